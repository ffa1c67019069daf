// torpanel-core/src/tasks/poller.rs

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use super::Refresher;

/// Control handle for a running poll loop. Dropping it cancels the loop.
pub struct PollHandle {
    cancel: CancellationToken,
    paused: watch::Sender<bool>,
    join: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Ticks keep firing while paused but no refresh is issued.
    pub fn pause(&self) {
        self.paused.send_replace(true);
    }

    pub fn resume(&self) {
        self.paused.send_replace(false);
    }

    pub fn is_paused(&self) -> bool {
        *self.paused.borrow()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stops the loop, abandoning any refresh in flight.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Cancels and waits for the loop task to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(join) = self.join.take() {
            let _ = join.await;
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Spawns a loop that refreshes immediately, then every `every`.
///
/// A slow refresh delays the next tick rather than piling ticks up.
pub fn spawn_poll_loop(refresher: Arc<dyn Refresher>, every: Duration) -> PollHandle {
    let cancel = CancellationToken::new();
    let (paused_tx, paused_rx) = watch::channel(false);

    let token = cancel.clone();
    let join = tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("Status poll loop started (every {:?})", every);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {
                    if *paused_rx.borrow() {
                        trace!("Poll tick skipped: paused");
                        continue;
                    }
                    tokio::select! {
                        _ = token.cancelled() => break,
                        outcome = refresher.refresh() => {
                            trace!("Poll refresh finished: {:?}", outcome);
                        }
                    }
                }
            }
        }
        debug!("Status poll loop stopped");
    });

    PollHandle {
        cancel,
        paused: paused_tx,
        join: Some(join),
    }
}
