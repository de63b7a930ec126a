use chrono::NaiveDate;
use sqlx::FromRow;

use crate::api::job::models::{Category, JobRecord, UnknownVariant};
use crate::db::job_repository::RepositoryError;

/// Database representation of a job with all fields
#[derive(Debug, FromRow)]
pub struct JobRow {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub category: String,
    pub level: String,
    pub description: String,
    pub posted_at: NaiveDate,
    pub country_flag: Option<String>,
}

impl TryFrom<JobRow> for JobRecord {
    type Error = RepositoryError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let invalid = |e: UnknownVariant| RepositoryError::InvalidData(format!("job {}: {}", id, e));

        Ok(JobRecord {
            id,
            job_type: row.job_type.parse().map_err(invalid)?,
            level: row.level.parse().map_err(invalid)?,
            category: Category::new(&row.category),
            title: row.title,
            company: row.company,
            location: row.location,
            description: row.description,
            posted_at: row.posted_at,
            country_flag: row.country_flag,
        })
    }
}
