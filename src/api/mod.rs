use actix_web::web;

pub mod application;
pub mod auth;
pub mod company;
pub mod error;
pub mod health;
pub mod job;
pub mod listing;
pub mod validation;

/// Registers every route of the board
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::health_config)
        .configure(job::handlers::job_config)
        .configure(listing::listing_config)
        .configure(application::handlers::application_config)
        .configure(auth::handlers::auth_config)
        .configure(company::company_config);
}
