//! Background scheduling: the periodic status poll and the delayed
//! refreshes that follow lifecycle commands.

pub mod poller;
pub mod scheduler;

use async_trait::async_trait;

use crate::outcome::OperationOutcome;

pub use poller::{spawn_poll_loop, PollHandle};
pub use scheduler::RefreshScheduler;

/// Something that can run one refresh cycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Refresher: Send + Sync {
    async fn refresh(&self) -> OperationOutcome;
}
