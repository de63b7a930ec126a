use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use crate::api::job::models::JobRecord;
use crate::listing::debounce::Debouncer;
use crate::listing::filter::FilterSelection;
use crate::listing::state::{ListingState, ListingView};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Snapshot of a session returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub query: String,
    pub filters: FilterSelection,
    pub pending_query: bool,
    #[serde(flatten)]
    pub listing: ListingView,
}

/// Server-held listing state for one browsing client.
///
/// Filter changes apply immediately; typed queries go through the
/// debouncer and only the last one within the quiet period is applied.
pub struct ListingSession {
    id: Uuid,
    state: Arc<Mutex<ListingState>>,
    debouncer: Mutex<Debouncer>,
    last_touched: Mutex<Instant>,
}

impl ListingSession {
    fn new(id: Uuid, state: ListingState, debounce: Duration) -> Self {
        Self {
            id,
            state: Arc::new(Mutex::new(state)),
            debouncer: Mutex::new(Debouncer::new(debounce)),
            last_touched: Mutex::new(Instant::now()),
        }
    }

    fn touch(&self, now: Instant) {
        *lock(&self.last_touched) = now;
    }

    fn is_idle(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(*lock(&self.last_touched)) >= ttl
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Record a keystroke; the query is applied once input goes quiet
    pub fn set_query(&self, raw: String) {
        let state = Arc::clone(&self.state);
        let id = self.id;
        lock(&self.debouncer).schedule(async move {
            apply_query(&state, &raw);
            debug!("Session {} applied query {:?}", id, raw);
        });
    }

    pub fn set_filter(&self, dimension: &str, values: &[String]) -> bool {
        let applied = lock(&self.state).set_filter(dimension, values);
        if !applied {
            debug!("Session {} ignored unknown filter dimension {:?}", self.id, dimension);
        }
        applied
    }

    pub fn load_more(&self) -> bool {
        lock(&self.state).load_more()
    }

    /// Drop any query still waiting for its quiet period
    pub fn cancel_pending(&self) -> bool {
        lock(&self.debouncer).cancel()
    }

    pub fn view(&self) -> SessionView {
        let pending_query = lock(&self.debouncer).is_pending();
        let state = lock(&self.state);
        SessionView {
            id: self.id,
            query: state.raw_query().to_string(),
            filters: state.filters().clone(),
            pending_query,
            listing: state.view(),
        }
    }
}

fn apply_query(state: &Mutex<ListingState>, raw: &str) {
    lock(state).apply_query(raw);
}

/// Sessions untouched for this long are dropped
pub const DEFAULT_SESSION_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

/// In-process registry of listing sessions.
///
/// Every lookup refreshes a session's idle clock. Sessions idle for
/// `idle_ttl` are evicted on the next `create` or sweep and are no longer
/// returned by `get`.
pub struct SessionStore {
    page_size: usize,
    debounce: Duration,
    idle_ttl: Duration,
    sessions: Mutex<HashMap<Uuid, Arc<ListingSession>>>,
}

impl SessionStore {
    pub fn new(page_size: usize, debounce: Duration, idle_ttl: Duration) -> Self {
        Self {
            page_size,
            debounce,
            idle_ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Open a session over `collection` showing the first page of everything
    pub fn create(&self, collection: Vec<JobRecord>) -> Arc<ListingSession> {
        self.evict_idle();

        let id = Uuid::new_v4();
        let state = ListingState::new(Arc::new(collection), self.page_size);
        let session = Arc::new(ListingSession::new(id, state, self.debounce));

        lock(&self.sessions).insert(id, Arc::clone(&session));
        debug!("Opened listing session {}", id);
        session
    }

    pub fn get(&self, id: &Uuid) -> Option<Arc<ListingSession>> {
        let now = Instant::now();
        let session = lock(&self.sessions).get(id).cloned()?;
        if session.is_idle(now, self.idle_ttl) {
            self.remove(id);
            return None;
        }
        session.touch(now);
        Some(session)
    }

    /// Drop every idle session, cancelling its pending query; returns how many went
    pub fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let evicted: Vec<_> = {
            let mut sessions = lock(&self.sessions);
            let idle: Vec<Uuid> = sessions
                .iter()
                .filter(|(_, session)| session.is_idle(now, self.idle_ttl))
                .map(|(id, _)| *id)
                .collect();
            idle.iter().filter_map(|id| sessions.remove(id)).collect()
        };

        for session in &evicted {
            session.cancel_pending();
        }
        if !evicted.is_empty() {
            debug!("Evicted {} idle listing sessions", evicted.len());
        }
        evicted.len()
    }

    pub fn remove(&self, id: &Uuid) -> bool {
        match lock(&self.sessions).remove(id) {
            Some(session) => {
                session.cancel_pending();
                debug!("Closed listing session {}", id);
                true
            }
            None => false,
        }
    }

    /// Remove every session, cancelling pending queries; returns how many were open
    pub fn clear(&self) -> usize {
        let sessions: Vec<_> = lock(&self.sessions).drain().map(|(_, s)| s).collect();
        for session in &sessions {
            session.cancel_pending();
        }
        info!("Closed {} listing sessions", sessions.len());
        sessions.len()
    }

    pub fn open_sessions(&self) -> usize {
        lock(&self.sessions).len()
    }
}

/// Periodically evict idle sessions until the returned task is aborted
pub fn spawn_idle_sweeper(store: Arc<SessionStore>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            store.evict_idle();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::sample_jobs;
    use tokio::time::sleep;

    const IDLE_TTL: Duration = Duration::from_secs(60);

    fn store() -> SessionStore {
        SessionStore::new(10, Duration::from_millis(300), IDLE_TTL)
    }

    #[tokio::test(start_paused = true)]
    async fn query_is_applied_after_quiet_period() {
        let store = store();
        let session = store.create(sample_jobs());

        session.set_query("Hub".into());
        sleep(Duration::from_millis(150)).await;
        session.set_query("HubSpot".into());

        sleep(Duration::from_millis(299)).await;
        let view = session.view();
        assert!(view.pending_query);
        assert_eq!(view.listing.total, 4);

        sleep(Duration::from_millis(2)).await;
        let view = session.view();
        assert!(!view.pending_query);
        assert_eq!(view.query, "HubSpot");
        assert_eq!(view.listing.total, 1);
        assert_eq!(view.listing.jobs[0].company, "HubSpot");
    }

    #[tokio::test]
    async fn filters_apply_immediately() {
        let store = store();
        let session = store.create(sample_jobs());

        assert!(session.set_filter("category", &["Design".to_string()]));
        let view = session.view();
        assert_eq!(view.listing.total, 1);
        assert!(view
            .filters
            .selected(crate::listing::filter::FilterDimension::Category)
            .is_some_and(|values| values.contains("design")));

        assert!(!session.set_filter("colour", &["red".to_string()]));
        assert_eq!(session.view().listing.total, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn removing_a_session_cancels_its_pending_query() {
        let store = store();
        let session = store.create(sample_jobs());
        let id = session.id();

        session.set_query("nothing matches this".into());
        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.get(&id).is_none());

        sleep(Duration::from_millis(500)).await;
        assert_eq!(session.view().listing.total, 4);
    }

    #[tokio::test]
    async fn clear_closes_everything() {
        let store = store();
        store.create(sample_jobs());
        store.create(Vec::new());
        assert_eq!(store.open_sessions(), 2);

        assert_eq!(store.clear(), 2);
        assert_eq!(store.open_sessions(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_sessions_are_evicted() {
        let store = store();
        for _ in 0..1000 {
            store.create(Vec::new());
        }
        assert_eq!(store.open_sessions(), 1000);

        sleep(Duration::from_secs(7 * 24 * 60 * 60)).await;
        assert_eq!(store.evict_idle(), 1000);
        assert_eq!(store.open_sessions(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn creating_a_session_sweeps_idle_ones() {
        let store = store();
        store.create(Vec::new());
        store.create(Vec::new());

        sleep(IDLE_TTL).await;
        store.create(Vec::new());
        assert_eq!(store.open_sessions(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn lookups_keep_a_session_alive() {
        let store = store();
        let id = store.create(sample_jobs()).id();

        for _ in 0..5 {
            sleep(IDLE_TTL / 2).await;
            assert!(store.get(&id).is_some());
        }

        sleep(IDLE_TTL).await;
        assert!(store.get(&id).is_none());
        assert_eq!(store.open_sessions(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn eviction_cancels_pending_query() {
        let store = SessionStore::new(10, Duration::from_millis(300), Duration::from_millis(100));
        let session = store.create(sample_jobs());
        session.set_query("zendesk".into());

        sleep(Duration::from_millis(100)).await;
        assert_eq!(store.evict_idle(), 1);

        sleep(Duration::from_millis(500)).await;
        assert_eq!(session.view().listing.total, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_runs_periodically() {
        let store = Arc::new(store());
        store.create(Vec::new());
        let sweeper = spawn_idle_sweeper(Arc::clone(&store), Duration::from_secs(10));

        sleep(IDLE_TTL + Duration::from_secs(11)).await;
        assert_eq!(store.open_sessions(), 0);
        sweeper.abort();
    }
}
