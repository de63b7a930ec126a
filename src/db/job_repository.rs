use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::api::job::models::JobRecord;
use crate::db::models::JobRow;

/// Errors raised by job repositories
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored data could not be turned into a job record
    #[error("invalid job data: {0}")]
    InvalidData(String),
}

/// Read-only access to the job collection.
///
/// Listing, lookup and ranking only ever go through this trait so the
/// in-memory dataset can be swapped for a database without touching them.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Short backend name reported by health checks
    fn backend(&self) -> &'static str;

    /// Every job in collection order
    async fn all(&self) -> Result<Vec<JobRecord>, RepositoryError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<JobRecord>, RepositoryError>;
}

const SELECT_JOBS: &str = r#"
    SELECT id, title, company, location, job_type, category, level,
           description, posted_at, country_flag
    FROM jobs
"#;

/// Repository backed by the `jobs` table in PostgreSQL
pub struct PgJobRepository {
    pool: Pool<Postgres>,
}

impl PgJobRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn all(&self) -> Result<Vec<JobRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, JobRow>(&format!("{SELECT_JOBS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        debug!("Fetched {} jobs from database", rows.len());
        rows.into_iter().map(JobRecord::try_from).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<JobRecord>, RepositoryError> {
        debug!("Fetching job id={}", id);

        let row = sqlx::query_as::<_, JobRow>(&format!("{SELECT_JOBS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(JobRecord::try_from).transpose()
    }
}
