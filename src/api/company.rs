use actix_web::{
    get, post, HttpResponse,
    web::{ServiceConfig, scope},
};
use actix_web_validator::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::api::validation::validate_not_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CompanyType {
    #[default]
    #[serde(rename = "LLC")]
    Llc,
    #[serde(rename = "S Corporation")]
    SCorporation,
    #[serde(rename = "C Corporation")]
    CCorporation,
    #[serde(rename = "B Corporation")]
    BCorporation,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SocialLinks {
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
}

fn default_locations() -> u32 {
    1
}

/// Company registration form; validated and acknowledged, never stored
#[derive(Debug, Deserialize, Validate)]
pub struct CompanyRegistration {
    #[validate(custom(function = "validate_not_blank"))]
    pub company_name: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub address: String,
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
    #[serde(default)]
    pub company_type: CompanyType,
    pub tax_identification_number: Option<String>,
    pub annual_revenue: Option<String>,
    pub ceo_name: Option<String>,
    #[serde(default = "default_locations")]
    #[validate(range(min = 1, message = "A company has at least one location."))]
    pub number_of_locations: u32,
    pub business_hours: Option<String>,
    pub primary_product_service: Option<String>,
    #[validate(url(message = "Logo must be a valid URL."))]
    pub company_logo_url: Option<String>,
    #[validate(email(message = "Please enter a valid support email address."))]
    pub customer_support_email: Option<String>,
    #[serde(default)]
    pub social_media: SocialLinks,
}

#[derive(Debug, Serialize)]
pub struct RegisteredCompany {
    pub company_name: String,
    pub company_type: CompanyType,
    pub email: String,
    pub number_of_locations: u32,
    pub social_media: SocialLinks,
}

#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub message: String,
    pub company: RegisteredCompany,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyProfile {
    pub id: u32,
    pub name: &'static str,
    pub industry: &'static str,
    pub location: &'static str,
}

pub const FEATURED_COMPANIES: [CompanyProfile; 4] = [
    CompanyProfile { id: 1, name: "Company One", industry: "Tech", location: "New York, USA" },
    CompanyProfile { id: 2, name: "Company Two", industry: "Design", location: "London, UK" },
    CompanyProfile { id: 3, name: "Company Three", industry: "Finance", location: "San Francisco, USA" },
    CompanyProfile { id: 4, name: "Company Four", industry: "Marketing", location: "Berlin, Germany" },
];

#[post("/register")]
async fn register_company(form: Json<CompanyRegistration>) -> HttpResponse {
    let form = form.into_inner();
    info!("Company registration validated for {}", form.company_name);

    HttpResponse::Created().json(RegistrationResponse {
        message: "Company registered successfully".to_string(),
        company: RegisteredCompany {
            company_name: form.company_name,
            company_type: form.company_type,
            email: form.email,
            number_of_locations: form.number_of_locations,
            social_media: form.social_media,
        },
    })
}

#[get("")]
async fn list_companies() -> HttpResponse {
    HttpResponse::Ok().json(FEATURED_COMPANIES)
}

pub fn company_config(config: &mut ServiceConfig) {
    config.service(
        scope("companies")
            .service(list_companies)
            .service(register_company),
    );
}
