use std::sync::Arc;

use tracing::{debug, info};

use crate::api::error::ServiceError;
use crate::db::JobRepository;
use crate::listing::filter::filter_jobs;
use crate::listing::related::related_jobs;
use crate::listing::{ListingView, SearchQuery, VisibleWindow};
use super::dto::{JobPostedResponse, ListingRequest, RelatedJobsResponse};
use super::models::{JobDraft, JobRecord};

/// Parses a path-embedded job id; anything but a non-negative integer is rejected
pub fn parse_job_id(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok().filter(|id| *id >= 0)
}

/// Job service containing listing, lookup and ranking logic
pub struct JobService {
    repository: Arc<dyn JobRepository>,
    page_size: usize,
    related_limit: usize,
}

impl JobService {
    pub fn new(repository: Arc<dyn JobRepository>, page_size: usize, related_limit: usize) -> Self {
        Self {
            repository,
            page_size,
            related_limit,
        }
    }

    pub fn backend(&self) -> &'static str {
        self.repository.backend()
    }

    /// Full collection in its stored order
    pub async fn collection(&self) -> Result<Vec<JobRecord>, ServiceError> {
        Ok(self.repository.all().await?)
    }

    /// Filter, search and reveal the first `request.pages` pages
    pub async fn list(&self, request: &ListingRequest) -> Result<ListingView, ServiceError> {
        let jobs = self.collection().await?;
        let query = SearchQuery::new(&request.query);
        let filtered = filter_jobs(&jobs, &query, &request.filters);
        let window = VisibleWindow::with_pages(self.page_size, request.pages, filtered.len());

        debug!(
            "Service: listing query={:?} matched {} of {} jobs",
            query.as_str(),
            filtered.len(),
            jobs.len()
        );

        Ok(ListingView::new(&filtered, &window))
    }

    /// Single-record lookup
    ///
    /// # Returns
    /// - `Ok(JobRecord)` - the job whose id equals `raw_id`
    /// - `Err(ServiceError::JobNotFound)` - id is non-numeric, negative or absent
    pub async fn find(&self, raw_id: &str) -> Result<JobRecord, ServiceError> {
        let id = parse_job_id(raw_id).ok_or_else(|| ServiceError::JobNotFound(raw_id.to_string()))?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::JobNotFound(raw_id.to_string()))
    }

    /// Jobs most similar to the one identified by `raw_id`
    pub async fn related(
        &self,
        raw_id: &str,
        limit: Option<usize>,
    ) -> Result<RelatedJobsResponse, ServiceError> {
        let current = self.find(raw_id).await?;
        let jobs = self.collection().await?;
        let related = related_jobs(&current, &jobs, limit.unwrap_or(self.related_limit));

        Ok(RelatedJobsResponse {
            job_id: current.id,
            related,
        })
    }

    /// Accept a validated job posting.
    ///
    /// Drafts are echoed back and never added to the collection.
    pub fn post_job(&self, draft: JobDraft) -> JobPostedResponse {
        info!(
            "Service: Job posted title={:?} company={:?} category={}",
            draft.title, draft.company, draft.category
        );

        JobPostedResponse {
            message: "Job posted successfully!".to_string(),
            job: draft,
        }
    }
}
