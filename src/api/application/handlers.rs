use actix_multipart::form::MultipartForm;
use actix_web::{
    post, HttpResponse,
    web::{Data, ServiceConfig, scope},
};

use crate::api::error::ServiceError;
use crate::api::job::JobService;
use super::models::ApplicationForm;
use super::service::{inspect_resume, require_job_id, ApplicationService};

#[post("")]
async fn submit_application(
    jobs: Data<JobService>,
    applications: Data<ApplicationService>,
    form: MultipartForm<ApplicationForm>,
) -> Result<HttpResponse, ServiceError> {
    let (job_id, details, resume) = form.into_inner().into_parts();

    require_job_id(&job_id)?;
    let job = jobs.find(&job_id).await?;
    let resume = inspect_resume(resume.as_ref())?;
    let response = applications.submit(&job, details, &resume)?;

    Ok(HttpResponse::Created().json(response))
}

pub fn application_config(config: &mut ServiceConfig) {
    config.service(scope("applications").service(submit_application));
}
