pub mod auth_traits;
pub mod ui_traits;

pub use auth_traits::{CredentialCache, CredentialPrompt};
pub use ui_traits::Notifier;
