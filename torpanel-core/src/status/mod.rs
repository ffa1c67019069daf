//! Status snapshot ownership, the polling synchronizer and the pure render
//! mapping used by whatever displays the snapshot.

pub mod render;
pub mod store;
pub mod sync;

pub use render::{StatusView, VisualClass};
pub use store::{RefreshTicket, StatusStore};
pub use sync::StatusSynchronizer;
