use std::borrow::Cow;
use std::sync::LazyLock;

use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use regex::Regex;
use serde::Serialize;
use validator::{Validate, ValidationError};

static LINKEDIN_PROFILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(www\.)?linkedin\.com/in/[a-z0-9_-]+$").expect("valid regex")
});

/// Rejects a scheme prefix, then requires `(www.)linkedin.com/in/<handle>`
pub fn validate_linkedin_profile(value: &str) -> Result<(), ValidationError> {
    let lowered = value.to_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        return Err(ValidationError::new("linkedin_protocol").with_message(Cow::Borrowed(
            "LinkedIn URL should not start with \"http://\" or \"https://\". Please remove these prefixes.",
        )));
    }

    if !LINKEDIN_PROFILE.is_match(value) {
        return Err(ValidationError::new("linkedin_format").with_message(Cow::Borrowed(
            "Please enter a valid LinkedIn profile URL (e.g., linkedin.com/in/username).",
        )));
    }

    Ok(())
}

/// Raw multipart body of `POST /applications`.
///
/// Every part is optional at the extractor level so that missing fields
/// surface as field errors from validation rather than a malformed-body error.
#[derive(Debug, MultipartForm)]
pub struct ApplicationForm {
    pub job_id: Option<Text<String>>,
    pub name: Option<Text<String>>,
    pub email: Option<Text<String>>,
    pub phone: Option<Text<String>>,
    pub cover_letter: Option<Text<String>>,
    pub address: Option<Text<String>>,
    pub linkedin: Option<Text<String>>,
    pub portfolio: Option<Text<String>>,
    pub resume: Option<TempFile>,
}

fn text(field: Option<Text<String>>) -> String {
    field
        .map(|text| text.into_inner().trim().to_string())
        .unwrap_or_default()
}

fn optional(field: Option<Text<String>>) -> Option<String> {
    Some(text(field)).filter(|value| !value.is_empty())
}

impl ApplicationForm {
    /// Split into the job id, the applicant fields and the uploaded file
    pub fn into_parts(self) -> (String, ApplicantDetails, Option<TempFile>) {
        let details = ApplicantDetails {
            name: text(self.name),
            email: text(self.email),
            phone: text(self.phone),
            cover_letter: optional(self.cover_letter),
            address: optional(self.address),
            linkedin: text(self.linkedin),
            portfolio: optional(self.portfolio),
        };
        (text(self.job_id), details, self.resume)
    }
}

/// Applicant-entered fields of an application
#[derive(Debug, Clone, Serialize, Validate)]
pub struct ApplicantDetails {
    #[validate(length(min = 1, message = "Full name is required."))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone number is required."))]
    pub phone: String,
    pub cover_letter: Option<String>,
    pub address: Option<String>,
    #[validate(custom(function = "validate_linkedin_profile"))]
    pub linkedin: String,
    #[validate(url(message = "Portfolio must be a valid URL."))]
    pub portfolio: Option<String>,
}

/// What the service needs to know about an uploaded resume
#[derive(Debug, Clone, Default)]
pub struct ResumeUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size: usize,
    /// First bytes of the file, used to recognise PDF content
    pub header: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeSummary {
    pub file_name: Option<String>,
    pub size: usize,
}

/// Accepted application echoed back to the applicant
#[derive(Debug, Clone, Serialize)]
pub struct SubmittedApplication {
    pub job_id: i32,
    pub job_title: String,
    pub company: String,
    pub applicant: ApplicantDetails,
    pub resume: ResumeSummary,
}

#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub message: String,
    pub application: SubmittedApplication,
}
