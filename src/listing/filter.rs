use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::api::job::models::JobRecord;

/// Categorical dimensions a listing can be narrowed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterDimension {
    Type,
    Category,
    Level,
}

impl FilterDimension {
    /// Unknown names yield `None` and are treated as no constraint by callers
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "type" => Some(FilterDimension::Type),
            "category" => Some(FilterDimension::Category),
            "level" => Some(FilterDimension::Level),
            _ => None,
        }
    }

    fn value_of<'a>(&self, job: &'a JobRecord) -> &'a str {
        match self {
            FilterDimension::Type => job.job_type.as_str(),
            FilterDimension::Category => job.category.as_str(),
            FilterDimension::Level => job.level.as_str(),
        }
    }
}

/// Selected values per dimension.
///
/// Values are kept lowercased so membership tests are case-insensitive.
/// A dimension with no entry imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterSelection {
    selected: BTreeMap<FilterDimension, BTreeSet<String>>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection of the dimension called `name`.
    ///
    /// Returns `false` (leaving the selection untouched) when `name` is not a
    /// known dimension.
    pub fn set<I, S>(&mut self, name: &str, values: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(dimension) = FilterDimension::parse(name) else {
            return false;
        };

        let values: BTreeSet<String> = values
            .into_iter()
            .filter_map(|value| normalize(value.as_ref()))
            .collect();

        if values.is_empty() {
            self.selected.remove(&dimension);
        } else {
            self.selected.insert(dimension, values);
        }
        true
    }

    /// Add one value to the dimension called `name`; unknown names are ignored
    pub fn insert(&mut self, name: &str, value: &str) -> bool {
        match (FilterDimension::parse(name), normalize(value)) {
            (Some(dimension), Some(value)) => {
                self.selected.entry(dimension).or_default().insert(value);
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub fn selected(&self, dimension: FilterDimension) -> Option<&BTreeSet<String>> {
        self.selected.get(&dimension)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// OR within a dimension, AND across dimensions
    pub fn matches(&self, job: &JobRecord) -> bool {
        self.selected.iter().all(|(dimension, values)| {
            values.contains(&dimension.value_of(job).to_lowercase())
        })
    }
}

fn normalize(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_lowercase())
}

/// Free-text search term, trimmed and case-folded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        SearchQuery(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Substring match against title, company or location
    pub fn matches(&self, job: &JobRecord) -> bool {
        self.is_empty()
            || [&job.title, &job.company, &job.location]
                .iter()
                .any(|field| field.to_lowercase().contains(&self.0))
    }
}

/// Records matching both the query and the filters, in collection order
pub fn filter_jobs(
    jobs: &[JobRecord],
    query: &SearchQuery,
    filters: &FilterSelection,
) -> Vec<JobRecord> {
    if query.is_empty() && filters.is_empty() {
        return jobs.to_vec();
    }

    jobs.iter()
        .filter(|job| query.matches(job) && filters.matches(job))
        .cloned()
        .collect()
}
