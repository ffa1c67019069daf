use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tokio::sync::watch;
use tracing::debug;

use torpanel_common::models::StatusSnapshot;

/// Issued when a refresh starts; orders responses by request issue time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// Owner of the single status snapshot.
///
/// `apply` is the only mutation path. A response is applied only when its
/// ticket is newer than the last applied one, so a slow response to an older
/// request can never overwrite a newer snapshot.
pub struct StatusStore {
    tx: watch::Sender<StatusSnapshot>,
    issued: AtomicU64,
    applied: Mutex<u64>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::with_snapshot(StatusSnapshot::default())
    }

    pub fn with_snapshot(snapshot: StatusSnapshot) -> Self {
        let (tx, _rx) = watch::channel(snapshot);
        Self {
            tx,
            issued: AtomicU64::new(0),
            applied: Mutex::new(0),
        }
    }

    pub fn begin_refresh(&self) -> RefreshTicket {
        RefreshTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Replaces the snapshot if `ticket` is the newest seen so far.
    /// Returns whether the snapshot was replaced.
    pub fn apply(&self, ticket: RefreshTicket, snapshot: StatusSnapshot) -> bool {
        let mut applied = match self.applied.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if ticket.0 <= *applied {
            debug!(
                "Discarding stale status response (ticket {} <= applied {})",
                ticket.0, *applied
            );
            return false;
        }
        *applied = ticket.0;
        self.tx.send_replace(snapshot);
        true
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.tx.borrow().clone()
    }

    /// Change notifications for display layers.
    pub fn subscribe(&self) -> watch::Receiver<StatusSnapshot> {
        self.tx.subscribe()
    }
}

impl Default for StatusStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use torpanel_common::models::ServiceState;

    fn running() -> StatusSnapshot {
        StatusSnapshot {
            tor_status: ServiceState::Running,
            ..StatusSnapshot::default()
        }
    }

    #[test]
    fn newer_ticket_replaces_snapshot() {
        let store = StatusStore::new();
        let t = store.begin_refresh();
        assert!(store.apply(t, running()));
        assert_eq!(store.snapshot(), running());
    }

    #[test]
    fn slower_older_response_is_discarded() {
        let store = StatusStore::new();
        let older = store.begin_refresh();
        let newer = store.begin_refresh();

        assert!(store.apply(newer, running()));
        assert!(!store.apply(older, StatusSnapshot::default()));
        assert_eq!(store.snapshot(), running());
    }

    #[tokio::test]
    async fn subscribers_see_replacements() {
        let store = StatusStore::new();
        let mut rx = store.subscribe();
        store.apply(store.begin_refresh(), running());
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), running());
    }
}
