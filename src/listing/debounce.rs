use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Quiet period before a typed search query is applied
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Runs only the most recently scheduled task, once `delay` has passed
/// without a newer one replacing it.
///
/// Must be used from within a Tokio runtime. Dropping the debouncer
/// cancels whatever is still pending.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Cancel the pending task (if any) and schedule `task` in its place
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            task.await;
        }));
    }

    /// Returns `true` if a task was still waiting to run
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> Arc<Mutex<Vec<&'static str>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn record(log: &Arc<Mutex<Vec<&'static str>>>, value: &'static str) -> impl Future<Output = ()> {
        let log = Arc::clone(log);
        async move { log.lock().unwrap().push(value) }
    }

    #[tokio::test(start_paused = true)]
    async fn runs_after_quiet_period() {
        let log = recorder();
        let mut debouncer = Debouncer::new(DEFAULT_SEARCH_DEBOUNCE);

        debouncer.schedule(record(&log, "rust"));
        sleep(Duration::from_millis(299)).await;
        assert!(log.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(*log.lock().unwrap(), vec!["rust"]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn newer_input_replaces_pending_task() {
        let log = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.schedule(record(&log, "r"));
        sleep(Duration::from_millis(200)).await;
        debouncer.schedule(record(&log, "ru"));
        sleep(Duration::from_millis(200)).await;
        debouncer.schedule(record(&log, "rust"));

        sleep(Duration::from_millis(299)).await;
        assert!(log.lock().unwrap().is_empty());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(*log.lock().unwrap(), vec!["rust"]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_and_drop_prevent_execution() {
        let log = recorder();

        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.schedule(record(&log, "cancelled"));
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        let mut dropped = Debouncer::new(Duration::from_millis(300));
        dropped.schedule(record(&log, "dropped"));
        drop(dropped);

        sleep(Duration::from_millis(500)).await;
        assert!(log.lock().unwrap().is_empty());
    }
}
