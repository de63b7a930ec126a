use std::sync::Arc;

use actix_web::{
    delete, get, post, put, HttpResponse,
    web::{Data, Json, Path, ServiceConfig, scope},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ServiceError;
use crate::api::job::JobService;
use crate::listing::session::ListingSession;
use crate::listing::SessionStore;

#[derive(Debug, Deserialize)]
struct QueryInput {
    #[serde(default)]
    query: String,
}

#[derive(Debug, Deserialize)]
struct FilterInput {
    #[serde(default)]
    values: Vec<String>,
}

fn session(store: &SessionStore, id: Uuid) -> Result<Arc<ListingSession>, ServiceError> {
    store.get(&id).ok_or(ServiceError::SessionNotFound(id))
}

#[post("")]
async fn create_session(
    store: Data<SessionStore>,
    jobs: Data<JobService>,
) -> Result<HttpResponse, ServiceError> {
    let session = store.create(jobs.collection().await?);
    Ok(HttpResponse::Created()
        .insert_header(("Location", format!("/listing/sessions/{}", session.id())))
        .json(session.view()))
}

#[get("/{id}")]
async fn get_session(store: Data<SessionStore>, id: Path<Uuid>) -> Result<HttpResponse, ServiceError> {
    Ok(HttpResponse::Ok().json(session(&store, *id)?.view()))
}

#[delete("/{id}")]
async fn delete_session(store: Data<SessionStore>, id: Path<Uuid>) -> Result<HttpResponse, ServiceError> {
    let id = id.into_inner();
    if store.remove(&id) {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(ServiceError::SessionNotFound(id))
    }
}

/// Debounced: the query takes effect after the quiet period
#[put("/{id}/query")]
async fn set_query(
    store: Data<SessionStore>,
    id: Path<Uuid>,
    input: Json<QueryInput>,
) -> Result<HttpResponse, ServiceError> {
    let session = session(&store, *id)?;
    session.set_query(input.into_inner().query);
    Ok(HttpResponse::Accepted().json(session.view()))
}

#[put("/{id}/filters/{dimension}")]
async fn set_filter(
    store: Data<SessionStore>,
    path: Path<(Uuid, String)>,
    input: Json<FilterInput>,
) -> Result<HttpResponse, ServiceError> {
    let (id, dimension) = path.into_inner();
    let session = session(&store, id)?;
    session.set_filter(&dimension, &input.values);
    Ok(HttpResponse::Ok().json(session.view()))
}

#[post("/{id}/more")]
async fn load_more(store: Data<SessionStore>, id: Path<Uuid>) -> Result<HttpResponse, ServiceError> {
    let session = session(&store, *id)?;
    session.load_more();
    Ok(HttpResponse::Ok().json(session.view()))
}

pub fn listing_config(config: &mut ServiceConfig) {
    config.service(
        scope("listing/sessions")
            .service(create_session)
            .service(get_session)
            .service(delete_session)
            .service(set_query)
            .service(set_filter)
            .service(load_more),
    );
}
