use serde::Serialize;

use crate::api::job::models::JobRecord;

pub const DEFAULT_RELATED_LIMIT: usize = 3;

const CATEGORY_WEIGHT: u8 = 3;
const TYPE_WEIGHT: u8 = 2;
const LEVEL_WEIGHT: u8 = 1;

/// A candidate job together with its similarity to the one being viewed
#[derive(Debug, Clone, Serialize)]
pub struct RelatedJob {
    pub score: u8,
    #[serde(flatten)]
    pub job: JobRecord,
}

/// Weighted category/type/level overlap, 0..=6
pub fn similarity(current: &JobRecord, candidate: &JobRecord) -> u8 {
    let mut score = 0;
    if candidate.category == current.category {
        score += CATEGORY_WEIGHT;
    }
    if candidate.job_type == current.job_type {
        score += TYPE_WEIGHT;
    }
    if candidate.level == current.level {
        score += LEVEL_WEIGHT;
    }
    score
}

/// Up to `limit` jobs most similar to `current`, best first.
///
/// Jobs whose title equals the current title are excluded, so the viewed
/// job never recommends itself (nor any same-titled posting). Equal scores
/// keep collection order.
pub fn related_jobs(current: &JobRecord, all: &[JobRecord], limit: usize) -> Vec<RelatedJob> {
    let mut ranked: Vec<RelatedJob> = all
        .iter()
        .filter(|job| job.title != current.title)
        .map(|job| RelatedJob {
            score: similarity(current, job),
            job: job.clone(),
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(limit);
    ranked
}
