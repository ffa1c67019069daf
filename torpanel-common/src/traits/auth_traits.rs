use async_trait::async_trait;

use crate::error::Error;
use crate::models::credentials::{CredentialField, Credentials};

/// Durable storage for the operator credential pair.
///
/// `load` returns whatever is present; missing entries are `None`, not errors.
pub trait CredentialCache: Send + Sync {
    fn load(&self) -> Result<Credentials, Error>;
    fn store(&self, credentials: &Credentials) -> Result<(), Error>;
}

/// Interactive capability for asking the operator for one credential field.
///
/// `Ok(None)` means the operator cancelled or left the field blank.
#[async_trait]
pub trait CredentialPrompt: Send + Sync {
    async fn ask(&self, field: CredentialField) -> Result<Option<String>, Error>;
}
