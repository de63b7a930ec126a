use std::sync::Arc;

use serde::Serialize;

use crate::api::job::models::JobRecord;
use crate::listing::filter::{filter_jobs, FilterSelection, SearchQuery};
use crate::listing::window::VisibleWindow;

/// Visible prefix of a filtered listing plus its bookkeeping
#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    pub jobs: Vec<JobRecord>,
    pub total: usize,
    pub visible: usize,
    pub pages: usize,
    pub has_more: bool,
    pub no_results: bool,
}

impl ListingView {
    pub fn new(filtered: &[JobRecord], window: &VisibleWindow) -> Self {
        let jobs = window.slice(filtered).to_vec();
        ListingView {
            total: filtered.len(),
            visible: jobs.len(),
            pages: window.pages(),
            has_more: window.has_more(filtered.len()),
            no_results: filtered.is_empty(),
            jobs,
        }
    }
}

/// Search, filter and pagination state of one listing.
///
/// Every change to the query or the filters recomputes the filtered set
/// and rewinds the window to its first page. Re-applying the query that is
/// already in effect changes nothing.
#[derive(Debug, Clone)]
pub struct ListingState {
    collection: Arc<Vec<JobRecord>>,
    /// Query as typed, kept for display
    raw_query: String,
    query: SearchQuery,
    filters: FilterSelection,
    filtered: Vec<JobRecord>,
    window: VisibleWindow,
}

impl ListingState {
    pub fn new(collection: Arc<Vec<JobRecord>>, page_size: usize) -> Self {
        let mut state = ListingState {
            filtered: Vec::new(),
            collection,
            raw_query: String::new(),
            query: SearchQuery::default(),
            filters: FilterSelection::new(),
            window: VisibleWindow::new(page_size),
        };
        state.refresh();
        state
    }

    /// Returns `false` when `raw` is the query already applied
    pub fn apply_query(&mut self, raw: &str) -> bool {
        if raw == self.raw_query {
            return false;
        }
        self.raw_query = raw.to_string();
        self.query = SearchQuery::new(raw);
        self.refresh();
        true
    }

    /// Replace one dimension's selection; unknown dimensions leave the state untouched
    pub fn set_filter<I, S>(&mut self, dimension: &str, values: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let applied = self.filters.set(dimension, values);
        if applied {
            self.refresh();
        }
        applied
    }

    pub fn load_more(&mut self) -> bool {
        self.window.load_more(self.filtered.len())
    }

    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    pub fn view(&self) -> ListingView {
        ListingView::new(&self.filtered, &self.window)
    }

    fn refresh(&mut self) {
        self.filtered = filter_jobs(&self.collection, &self.query, &self.filters);
        self.window.reset();
    }
}

#[cfg(test)]
impl ListingState {
    fn filtered(&self) -> &[JobRecord] {
        &self.filtered
    }

    fn visible(&self) -> &[JobRecord] {
        self.window.slice(&self.filtered)
    }

    fn has_more(&self) -> bool {
        self.window.has_more(self.filtered.len())
    }

    fn is_no_results(&self) -> bool {
        self.filtered.is_empty()
    }
}
