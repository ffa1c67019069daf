// torpanel-core/src/tasks/scheduler.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, trace};

use torpanel_common::models::CommandKind;

use super::Refresher;

/// One-shot delayed refreshes, at most one pending per command.
///
/// Scheduling a command that already has a pending refresh replaces it, so a
/// burst of the same command yields a single follow-up refresh.
pub struct RefreshScheduler {
    refresher: Arc<dyn Refresher>,
    delay: Duration,
    pending: Mutex<HashMap<CommandKind, JoinHandle<()>>>,
}

impl RefreshScheduler {
    pub fn new(refresher: Arc<dyn Refresher>, delay: Duration) -> Self {
        Self {
            refresher,
            delay,
            pending: Mutex::new(HashMap::new()),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CommandKind, JoinHandle<()>>> {
        match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn schedule(&self, key: CommandKind) {
        let refresher = self.refresher.clone();
        let delay = self.delay;

        let mut pending = self.lock();
        pending.retain(|_, handle| !handle.is_finished());
        if let Some(previous) = pending.remove(&key) {
            debug!("Replacing pending refresh for '{}'", key);
            previous.abort();
        }

        let handle = tokio::spawn(async move {
            sleep(delay).await;
            trace!("Running delayed refresh for '{}'", key);
            refresher.refresh().await;
        });
        pending.insert(key, handle);
        debug!("Scheduled refresh for '{}' in {:?}", key, delay);
    }

    pub fn is_pending(&self, key: CommandKind) -> bool {
        self.lock().get(&key).is_some_and(|h| !h.is_finished())
    }

    pub fn pending_count(&self) -> usize {
        self.lock().values().filter(|h| !h.is_finished()).count()
    }

    pub fn cancel(&self, key: CommandKind) {
        if let Some(handle) = self.lock().remove(&key) {
            handle.abort();
        }
    }

    pub fn cancel_all(&self) {
        for (_, handle) in self.lock().drain() {
            handle.abort();
        }
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::OperationOutcome;
    use crate::tasks::MockRefresher;
    use crate::test_utils::CountingRefresher;

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_delay() {
        let mut refresher = MockRefresher::new();
        refresher
            .expect_refresh()
            .times(1)
            .returning(|| OperationOutcome::Applied);
        let scheduler = RefreshScheduler::new(Arc::new(refresher), Duration::from_secs(2));

        scheduler.schedule(CommandKind::Start);
        settle().await;
        assert!(scheduler.is_pending(CommandKind::Start));

        tokio::time::advance(Duration::from_millis(1999)).await;
        settle().await;
        assert!(scheduler.is_pending(CommandKind::Start));

        tokio::time::advance(Duration::from_millis(1)).await;
        settle().await;
        assert!(!scheduler.is_pending(CommandKind::Start));
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_command_collapses_to_one_refresh() {
        let refresher = Arc::new(CountingRefresher::new());
        let scheduler = RefreshScheduler::new(refresher.clone(), Duration::from_secs(2));

        scheduler.schedule(CommandKind::NewIdentity);
        settle().await;
        tokio::time::advance(Duration::from_secs(1)).await;
        scheduler.schedule(CommandKind::NewIdentity);
        scheduler.schedule(CommandKind::Stop);
        settle().await;
        assert_eq!(scheduler.pending_count(), 2);

        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(refresher.count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_drops_pending_refreshes() {
        let refresher = Arc::new(CountingRefresher::new());
        let scheduler = RefreshScheduler::new(refresher.clone(), Duration::from_secs(2));
        scheduler.schedule(CommandKind::Restart);
        scheduler.cancel_all();

        tokio::time::advance(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(refresher.count(), 0);
    }
}
