use serde::Serialize;

use crate::api::job::models::JobDraft;
use crate::listing::related::RelatedJob;
use crate::listing::FilterSelection;

/// Query parameters of `GET /jobs`.
///
/// Built from raw key/value pairs so filter keys may repeat
/// (`type=remote&type=contract`) or carry comma-separated values
/// (`type=remote,contract`). Keys that name no dimension are ignored.
#[derive(Debug, Clone, Default)]
pub struct ListingRequest {
    pub query: String,
    pub filters: FilterSelection,
    pub pages: usize,
}

impl ListingRequest {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut request = ListingRequest {
            pages: 1,
            ..Default::default()
        };

        for (key, value) in pairs {
            match key.as_str() {
                "q" | "query" => request.query = value.clone(),
                "pages" => request.pages = value.trim().parse().unwrap_or(1),
                _ => {
                    for part in value.split(',') {
                        request.filters.insert(key, part);
                    }
                }
            }
        }

        request
    }
}

/// Response for the related-jobs ranking of one job
#[derive(Serialize)]
pub struct RelatedJobsResponse {
    pub job_id: i32,
    pub related: Vec<RelatedJob>,
}

/// Response for a validated job posting
#[derive(Serialize)]
pub struct JobPostedResponse {
    pub message: String,
    pub job: JobDraft,
}
