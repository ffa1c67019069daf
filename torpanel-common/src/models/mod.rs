pub mod command;
pub mod credentials;
pub mod logs;
pub mod status;

pub use command::{BridgeRequest, CommandKind, CommandResponse};
pub use credentials::{CredentialField, Credentials};
pub use logs::{LogBundle, LogTarget, ALL_SERVICES};
pub use status::{ServiceState, StatusSnapshot};
