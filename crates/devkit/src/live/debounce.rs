use std::future::Future;
use std::time::Duration;
use tokio::task::{AbortHandle, JoinHandle};

/// Default settle time before a scheduled job runs
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

/// Runs only the most recently scheduled job, once input has been quiet for `delay`
///
/// Cancelling aborts a job that is still waiting out its delay. A job that has
/// already started runs to completion; pair it with a [`super::Sequencer`] to
/// drop results that went stale while it ran.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

/// Cancels one scheduled job
#[derive(Debug, Clone)]
pub struct CancelHandle(AbortHandle);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.abort();
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `job` after the delay, cancelling whatever was pending
    pub fn schedule<F>(&mut self, job: F) -> CancelHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = tokio::spawn(job).await {
                log::warn!("debounced job failed: {e}");
            }
        });

        let cancel = CancelHandle(handle.abort_handle());
        self.pending = Some(handle);
        cancel
    }

    /// Drop the pending job, if it is still waiting
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            log::debug!("cancelling pending debounced job");
            handle.abort();
        }
    }

    /// Wait for the pending job to fire and finish
    pub async fn settle(&mut self) {
        if let Some(handle) = self.pending.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    log::warn!("debounced job failed: {e}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    const DELAY: Duration = Duration::from_millis(30);

    #[tokio::test]
    async fn test_rapid_schedules_run_only_the_last() {
        let runs = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(Mutex::new(None));
        let mut debouncer = Debouncer::new(DELAY);

        for value in 1..=5 {
            let runs = Arc::clone(&runs);
            let last = Arc::clone(&last);
            debouncer.schedule(async move {
                runs.fetch_add(1, Ordering::SeqCst);
                *last.lock().unwrap() = Some(value);
            });
        }

        debouncer.settle().await;

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(*last.lock().unwrap(), Some(5));
    }

    #[tokio::test]
    async fn test_spaced_schedules_all_run() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(DELAY);

        for _ in 0..3 {
            let runs = Arc::clone(&runs);
            debouncer.schedule(async move {
                runs.fetch_add(1, Ordering::SeqCst);
            });
            debouncer.settle().await;
        }

        assert_eq!(runs.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_cancel_handle_prevents_run() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(DELAY);

        let handle = {
            let runs = Arc::clone(&runs);
            debouncer.schedule(async move {
                runs.fetch_add(1, Ordering::SeqCst);
            })
        };
        handle.cancel();
        debouncer.settle().await;
        tokio::time::sleep(DELAY * 2).await;

        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_default_delay() {
        assert_eq!(Debouncer::default().delay(), Duration::from_millis(300));
    }
}
