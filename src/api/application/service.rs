use std::borrow::Cow;
use std::io::Read;

use actix_multipart::form::tempfile::TempFile;
use tracing::info;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::api::error::ServiceError;
use crate::api::job::JobRecord;
use super::models::{
    ApplicantDetails, ApplicationResponse, ResumeSummary, ResumeUpload, SubmittedApplication,
};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Prefix the scheme the applicant was asked to leave out
pub fn normalize_linkedin(value: &str) -> String {
    format!("https://{}", value)
}

/// Reads what validation needs from a spooled upload
pub fn inspect_resume(resume: Option<&TempFile>) -> Result<ResumeUpload, ServiceError> {
    let Some(resume) = resume else {
        return Ok(ResumeUpload::default());
    };

    let mut header = Vec::with_capacity(PDF_MAGIC.len());
    resume
        .file
        .reopen()
        .and_then(|file| file.take(PDF_MAGIC.len() as u64).read_to_end(&mut header))
        .map_err(|e| ServiceError::Submission(format!("cannot read uploaded resume: {}", e)))?;

    Ok(ResumeUpload {
        file_name: resume.file_name.clone(),
        content_type: resume
            .content_type
            .as_ref()
            .map(|mime| mime.essence_str().to_string()),
        size: resume.size,
        header,
    })
}

fn invalid(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

/// A blank `job_id` part is a missing field, not an unknown job
pub fn require_job_id(job_id: &str) -> Result<(), ServiceError> {
    if !job_id.is_empty() {
        return Ok(());
    }
    let mut errors = ValidationErrors::new();
    errors.add("job_id", invalid("job_id_missing", "Job id is required.".to_string()));
    Err(ServiceError::Validation(errors))
}

/// Application service containing submission rules
pub struct ApplicationService {
    max_resume_size: usize,
}

impl ApplicationService {
    pub fn new(max_resume_size: usize) -> Self {
        Self { max_resume_size }
    }

    fn check_resume(&self, resume: &ResumeUpload) -> Option<ValidationError> {
        let declared_pdf = resume.content_type.as_deref() == Some("application/pdf")
            || resume
                .file_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().ends_with(".pdf"));

        if resume.size == 0 {
            Some(invalid("resume_missing", "Resume is required.".to_string()))
        } else if resume.size > self.max_resume_size {
            Some(invalid(
                "resume_size",
                format!("Resume must not exceed {} bytes.", self.max_resume_size),
            ))
        } else if !declared_pdf || !resume.header.starts_with(PDF_MAGIC) {
            Some(invalid("resume_type", "Resume must be a PDF file.".to_string()))
        } else {
            None
        }
    }

    /// Validate and accept an application for `job`
    ///
    /// # Business Logic
    /// - Validates applicant fields and the resume together, reporting every failure
    /// - Normalizes the LinkedIn profile to an `https://` URL
    /// - Nothing is stored; the accepted application is echoed back
    pub fn submit(
        &self,
        job: &JobRecord,
        mut details: ApplicantDetails,
        resume: &ResumeUpload,
    ) -> Result<ApplicationResponse, ServiceError> {
        let mut errors = details.validate().err().unwrap_or_else(ValidationErrors::new);
        if let Some(error) = self.check_resume(resume) {
            errors.add("resume", error);
        }
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        details.linkedin = normalize_linkedin(&details.linkedin);

        info!(
            "Service: Application received for job id={} from {}",
            job.id, details.email
        );

        Ok(ApplicationResponse {
            message: "Application submitted successfully".to_string(),
            application: SubmittedApplication {
                job_id: job.id,
                job_title: job.title.clone(),
                company: job.company.clone(),
                applicant: details,
                resume: ResumeSummary {
                    file_name: resume.file_name.clone(),
                    size: resume.size,
                },
            },
        })
    }
}
