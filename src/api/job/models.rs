use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::api::validation::{validate_letters_and_spaces, validate_location, validate_not_blank};

/// Error returned when a stored value does not name a known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Employment type of a job posting
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Freelance,
    Contract,
    Internship,
    Remote,
}

impl JobType {
    pub const ALL: [JobType; 6] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Freelance,
        JobType::Contract,
        JobType::Internship,
        JobType::Remote,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Freelance => "freelance",
            JobType::Contract => "contract",
            JobType::Internship => "internship",
            JobType::Remote => "remote",
        }
    }
}

impl FromStr for JobType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        JobType::ALL
            .into_iter()
            .find(|variant| variant.as_str() == wanted)
            .ok_or_else(|| UnknownVariant {
                kind: "job type",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seniority level of a job posting
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Entry,
    Mid,
    Senior,
    Director,
    Executive,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Entry,
        Level::Mid,
        Level::Senior,
        Level::Director,
        Level::Executive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Entry => "entry",
            Level::Mid => "mid",
            Level::Senior => "senior",
            Level::Director => "director",
            Level::Executive => "executive",
        }
    }
}

impl FromStr for Level {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Level::ALL
            .into_iter()
            .find(|variant| variant.as_str() == wanted)
            .ok_or_else(|| UnknownVariant {
                kind: "level",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job category.
///
/// Categories are open-ended in stored collections; newly posted jobs
/// must pick one of [`Category::KNOWN`].
/// Values are stored trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Category(String);

impl Category {
    pub const DESIGN: &'static str = "design";
    pub const DEVELOPMENT: &'static str = "development";
    pub const MARKETING: &'static str = "marketing";
    pub const SUPPORT: &'static str = "support";
    pub const PRODUCT_MANAGEMENT: &'static str = "product-management";
    pub const BUSINESS: &'static str = "business";

    pub const KNOWN: [&'static str; 6] = [
        Self::DESIGN,
        Self::DEVELOPMENT,
        Self::MARKETING,
        Self::SUPPORT,
        Self::PRODUCT_MANAGEMENT,
        Self::BUSINESS,
    ];

    pub fn new(value: &str) -> Self {
        Category(value.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        Self::KNOWN.contains(&self.0.as_str())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::new(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One job posting as served by the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub category: Category,
    pub level: Level,
    pub description: String,
    pub posted_at: NaiveDate,
    #[serde(default)]
    pub country_flag: Option<String>,
}

/// Payload of the "post a job" form.
///
/// Drafts are validated and echoed back; they never enter the listing collection.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct JobDraft {
    #[validate(
        custom(function = "validate_title_present"),
        length(min = 3, message = "Job Title should be at least 3 characters.")
    )]
    pub title: String,
    #[validate(custom(function = "validate_company_name"))]
    pub company: String,
    #[validate(custom(function = "validate_job_location"))]
    pub location: String,
    #[serde(rename = "type", default = "default_job_type")]
    pub job_type: JobType,
    #[serde(default = "default_category")]
    #[validate(custom(function = "validate_known_category"))]
    pub category: Category,
    #[serde(default = "default_level")]
    pub level: Level,
    #[validate(
        custom(function = "validate_description_present"),
        length(
            min = 20,
            max = 500,
            message = "Job Description should be between 20 and 500 characters long."
        )
    )]
    pub description: String,
    #[validate(length(min = 1, message = "Company Logo is required."))]
    #[serde(default)]
    pub logo_url: String,
}

fn required(value: &str, message: &'static str) -> Result<(), ValidationError> {
    validate_not_blank(value).map_err(|e| e.with_message(std::borrow::Cow::Borrowed(message)))
}

fn validate_title_present(value: &str) -> Result<(), ValidationError> {
    required(value, "Job Title is required.")
}

fn validate_description_present(value: &str) -> Result<(), ValidationError> {
    required(value, "Job Description is required.")
}

fn validate_company_name(value: &str) -> Result<(), ValidationError> {
    required(value, "Company Name is required.")?;
    validate_letters_and_spaces(value)
}

fn validate_job_location(value: &str) -> Result<(), ValidationError> {
    required(value, "Location is required.")?;
    validate_location(value)
}

fn validate_known_category(category: &Category) -> Result<(), ValidationError> {
    if category.is_known() {
        Ok(())
    } else {
        Err(ValidationError::new("category").with_message(std::borrow::Cow::Borrowed(
            "Please choose one of the listed categories.",
        )))
    }
}

fn default_job_type() -> JobType {
    JobType::FullTime
}

fn default_category() -> Category {
    Category::new(Category::DESIGN)
}

fn default_level() -> Level {
    Level::Entry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_record_uses_flat_camel_case_fields() {
        let raw = r#"{
            "id": 7,
            "title": "UX Research Intern",
            "company": "Spotify",
            "location": "Stockholm, Sweden",
            "type": "internship",
            "category": "Design",
            "level": "entry",
            "description": "Plan studies",
            "postedAt": "2024-03-07",
            "countryFlag": "se"
        }"#;

        let job: JobRecord = serde_json::from_str(raw).expect("valid record");
        assert_eq!(job.job_type, JobType::Internship);
        assert_eq!(job.category.as_str(), "design");
        assert_eq!(job.posted_at, NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());

        let value = serde_json::to_value(&job).expect("serializes");
        assert_eq!(value["type"], "internship");
        assert_eq!(value["postedAt"], "2024-03-07");
        assert_eq!(value["countryFlag"], "se");
    }

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!("Full-Time".parse::<JobType>(), Ok(JobType::FullTime));
        assert_eq!(" SENIOR ".parse::<Level>(), Ok(Level::Senior));
        assert!("gig".parse::<JobType>().is_err());
    }

    #[test]
    fn categories_outside_the_known_set_are_kept() {
        let category = Category::new(" Data-Science ");
        assert_eq!(category.as_str(), "data-science");
        assert!(!category.is_known());
        assert!(Category::new("Business").is_known());
    }

    #[test]
    fn job_draft_collects_every_violation() {
        let draft = JobDraft {
            title: "QA".into(),
            company: "Acme 42".into(),
            location: "Berlin; Germany".into(),
            job_type: JobType::Contract,
            category: Category::new("development"),
            level: Level::Mid,
            description: "too short".into(),
            logo_url: String::new(),
        };

        let errors = draft.validate().expect_err("draft is invalid");
        let fields = errors.field_errors();
        for field in ["title", "company", "location", "description", "logo_url"] {
            assert!(fields.contains_key(field), "missing error for {field}");
        }
    }

    #[test]
    fn posted_jobs_need_a_listed_category() {
        let draft = JobDraft {
            title: "Data Analyst".into(),
            company: "Acme Labs".into(),
            location: "Berlin, Germany".into(),
            job_type: JobType::FullTime,
            category: Category::new("astrology"),
            level: Level::Mid,
            description: "Build dashboards for the growth team.".into(),
            logo_url: "https://cdn.example.com/acme.png".into(),
        };

        let errors = draft.validate().expect_err("category is unknown");
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("category"));
    }

    #[test]
    fn whitespace_only_required_fields_are_rejected() {
        let draft = JobDraft {
            title: "   ".into(),
            company: "   ".into(),
            location: "  ".into(),
            job_type: JobType::FullTime,
            category: Category::new("design"),
            level: Level::Entry,
            description: " ".repeat(25),
            logo_url: "https://cdn.example.com/acme.png".into(),
        };

        let errors = draft.validate().expect_err("blank fields are invalid");
        let fields = errors.field_errors();
        for (field, message) in [
            ("title", "Job Title is required."),
            ("company", "Company Name is required."),
            ("location", "Location is required."),
            ("description", "Job Description is required."),
        ] {
            let messages: Vec<_> = fields[field]
                .iter()
                .filter_map(|e| e.message.as_deref())
                .collect();
            assert!(messages.contains(&message), "{field}: {messages:?}");
        }
    }
}
