use actix_web::{
    post, HttpResponse,
    web::{Data, ServiceConfig, scope},
};
use actix_web_validator::Json;
use tracing::info;

use crate::api::error::ServiceError;
use super::models::{AuthResponse, LoginRequest, SignupRequest};
use super::verifier::CredentialVerifier;

#[post("/login")]
async fn login(
    verifier: Data<dyn CredentialVerifier>,
    request: Json<LoginRequest>,
) -> Result<HttpResponse, ServiceError> {
    if !verifier.verify(&request.email, &request.password).await {
        return Err(ServiceError::InvalidCredentials);
    }

    info!("Login accepted for {}", request.email);
    Ok(HttpResponse::Ok().json(AuthResponse::new("Login successful")))
}

#[post("/signup")]
async fn signup(request: Json<SignupRequest>) -> HttpResponse {
    info!("Sign-up validated for {}", request.email);
    HttpResponse::Ok().json(AuthResponse::new("Sign up successful. Please log in."))
}

pub fn auth_config(config: &mut ServiceConfig) {
    config.service(scope("auth").service(login).service(signup));
}
