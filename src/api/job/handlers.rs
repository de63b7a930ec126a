use actix_web::{
    get, post, HttpResponse,
    web::{Data, Path, Query, ServiceConfig, scope},
};
use actix_web_validator::Json;
use serde::Deserialize;

use crate::api::error::ServiceError;
use super::dto::ListingRequest;
use super::models::JobDraft;
use super::service::JobService;

#[derive(Debug, Deserialize)]
struct RelatedQuery {
    limit: Option<usize>,
}

#[get("")]
async fn list_jobs(
    service: Data<JobService>,
    params: Query<Vec<(String, String)>>,
) -> Result<HttpResponse, ServiceError> {
    let request = ListingRequest::from_pairs(&params);
    let view = service.list(&request).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("")]
async fn post_job(service: Data<JobService>, draft: Json<JobDraft>) -> HttpResponse {
    HttpResponse::Ok().json(service.post_job(draft.into_inner()))
}

#[get("/{id}")]
async fn get_job(
    service: Data<JobService>,
    id: Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.find(&id).await?;
    Ok(HttpResponse::Ok().json(job))
}

#[get("/{id}/related")]
async fn get_related_jobs(
    service: Data<JobService>,
    id: Path<String>,
    query: Query<RelatedQuery>,
) -> Result<HttpResponse, ServiceError> {
    let response = service.related(&id, query.limit).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub fn job_config(config: &mut ServiceConfig) {
    config.service(
        scope("jobs")
            .service(list_jobs)
            .service(post_job)
            .service(get_job)
            .service(get_related_jobs),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::test_job_service;
    use crate::api::validation;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(Data::new(test_job_service()))
                    .app_data(validation::json_config())
                    .configure(job_config),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn lookup_returns_flat_record() {
        let app = app!();
        let req = test::TestRequest::get().uri("/jobs/2").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["id"], 2);
        assert_eq!(body["title"], "Frontend Engineer");
        assert_eq!(body["type"], "remote");
    }

    #[actix_web::test]
    async fn lookup_of_unknown_or_malformed_id_is_not_found() {
        let app = app!();
        for uri in ["/jobs/999", "/jobs/abc", "/jobs/-1"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["fields"]["message"], "Job not found");
        }
    }

    #[actix_web::test]
    async fn listing_applies_query_and_filters() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/jobs?q=engineer&type=remote,full-time&colour=blue")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["total"], 1);
        assert_eq!(body["jobs"][0]["id"], 2);
        assert_eq!(body["no_results"], false);
        assert_eq!(body["has_more"], false);
    }

    #[actix_web::test]
    async fn listing_reports_no_results() {
        let app = app!();
        let req = test::TestRequest::get().uri("/jobs?q=astronaut").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["no_results"], true);
        assert_eq!(body["jobs"], json!([]));
    }

    #[actix_web::test]
    async fn related_jobs_are_ranked() {
        let app = app!();
        let req = test::TestRequest::get().uri("/jobs/1/related?limit=2").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["job_id"], 1);
        assert_eq!(body["related"].as_array().map(Vec::len), Some(2));
        assert!(body["related"][0]["score"].as_u64() >= body["related"][1]["score"].as_u64());
    }

    #[actix_web::test]
    async fn posting_an_invalid_job_lists_field_errors() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/jobs")
            .set_json(json!({
                "title": "QA",
                "company": "Acme 99",
                "location": "Paris",
                "description": "short",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Validation failed");
        for field in ["title", "company", "description", "logo_url"] {
            assert!(body["fields"][field]["errors"].is_array(), "missing {field}");
        }
    }

    #[actix_web::test]
    async fn posting_a_valid_job_echoes_the_draft() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/jobs")
            .set_json(json!({
                "title": "Platform Engineer",
                "company": "Acme Labs",
                "location": "Berlin, Germany",
                "type": "contract",
                "category": "development",
                "level": "senior",
                "description": "Operate the build and deployment platform.",
                "logo_url": "https://cdn.example.com/acme.png",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Job posted successfully!");
        assert_eq!(body["job"]["type"], "contract");
    }
}
