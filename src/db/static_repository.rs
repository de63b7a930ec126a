use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::api::job::models::JobRecord;
use crate::db::job_repository::{JobRepository, RepositoryError};

const EMBEDDED_JOBS: &str = include_str!("../../data/jobs.json");

/// Immutable in-memory job collection loaded once at start-up
#[derive(Debug, Clone, Default)]
pub struct StaticJobRepository {
    jobs: Arc<Vec<JobRecord>>,
}

impl StaticJobRepository {
    /// Wraps an existing collection; identifiers must be unique
    pub fn new(jobs: Vec<JobRecord>) -> Result<Self, RepositoryError> {
        let mut seen = HashSet::with_capacity(jobs.len());
        if let Some(duplicate) = jobs.iter().find(|job| !seen.insert(job.id)) {
            return Err(RepositoryError::InvalidData(format!(
                "duplicate job id {}",
                duplicate.id
            )));
        }

        Ok(Self {
            jobs: Arc::new(jobs),
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, RepositoryError> {
        let jobs: Vec<JobRecord> = serde_json::from_str(raw)
            .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;
        Self::new(jobs)
    }

    /// The dataset compiled into the binary
    pub fn embedded() -> Result<Self, RepositoryError> {
        Self::from_json(EMBEDDED_JOBS)
    }

    pub fn from_file(path: &Path) -> Result<Self, RepositoryError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            RepositoryError::InvalidData(format!("cannot read {}: {}", path.display(), e))
        })?;
        let repository = Self::from_json(&raw)?;
        info!("Loaded {} jobs from {}", repository.job_count(), path.display());
        Ok(repository)
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}

#[async_trait]
impl JobRepository for StaticJobRepository {
    fn backend(&self) -> &'static str {
        "static"
    }

    async fn all(&self) -> Result<Vec<JobRecord>, RepositoryError> {
        Ok(self.jobs.as_ref().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<JobRecord>, RepositoryError> {
        Ok(self.jobs.iter().find(|job| job.id == id).cloned())
    }
}
