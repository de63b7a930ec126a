use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;
use tracing::error;

use crate::api::job::JobService;
use crate::listing::SessionStore;

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    repository: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    jobs: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sessions: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Loads the collection once and reports either its size or the failure
async fn check_repository(
    jobs: &JobService,
    sessions: Option<usize>,
    up: &str,
    down: &str,
) -> HttpResponse {
    match jobs.collection().await {
        Ok(collection) => HttpResponse::Ok().json(HealthResponse {
            status: up.to_string(),
            repository: jobs.backend().to_string(),
            jobs: Some(collection.len()),
            sessions,
            error: None,
        }),
        Err(e) => {
            error!("{} check failed: {}", up, e);
            HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: down.to_string(),
                repository: jobs.backend().to_string(),
                jobs: None,
                sessions,
                error: Some(format!("Job repository unavailable: {}", e)),
            })
        }
    }
}

/// Health check endpoint
///
/// General health check including job repository access and open listing sessions.
#[get("/health")]
async fn health_check(
    jobs: web::Data<JobService>,
    sessions: web::Data<SessionStore>,
) -> impl Responder {
    check_repository(&jobs, Some(sessions.open_sessions()), "healthy", "unhealthy").await
}

/// Readiness check endpoint
///
/// Returns 503 while the job repository cannot be read.
#[get("/ready")]
async fn readiness_check(jobs: web::Data<JobService>) -> impl Responder {
    check_repository(&jobs, None, "ready", "not_ready").await
}

/// Liveness check endpoint
///
/// Simple check that the process is alive. Does not check dependencies.
#[get("/live")]
async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "alive".to_string(),
        repository: "not_checked".to_string(),
        jobs: None,
        sessions: None,
        error: None,
    })
}

pub fn health_config(config: &mut web::ServiceConfig) {
    config
        .service(health_check)
        .service(readiness_check)
        .service(liveness_check);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::test_job_service;
    use actix_web::{test, App};
    use serde_json::Value;
    use std::time::Duration;

    #[actix_web::test]
    async fn health_reports_backend_and_counts() {
        let sessions = web::Data::new(SessionStore::new(10, Duration::from_millis(300), Duration::from_secs(60)));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_job_service()))
                .app_data(sessions.clone())
                .configure(health_config),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["repository"], "static");
        assert_eq!(body["jobs"], 4);
        assert_eq!(body["sessions"], 0);

        let req = test::TestRequest::get().uri("/live").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "alive");
    }
}
