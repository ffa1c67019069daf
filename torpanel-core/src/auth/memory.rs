use std::sync::Mutex;

use torpanel_common::models::Credentials;
use torpanel_common::traits::CredentialCache;
use torpanel_common::Error;

/// Process-lifetime credential cache.
#[derive(Default)]
pub struct MemoryCache {
    inner: Mutex<Credentials>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(credentials: Credentials) -> Self {
        Self { inner: Mutex::new(credentials) }
    }
}

impl CredentialCache for MemoryCache {
    fn load(&self) -> Result<Credentials, Error> {
        self.inner
            .lock()
            .map(|guard| guard.clone())
            .map_err(|e| Error::Auth(format!("credential cache poisoned: {}", e)))
    }

    fn store(&self, credentials: &Credentials) -> Result<(), Error> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| Error::Auth(format!("credential cache poisoned: {}", e)))?;
        *guard = credentials.clone();
        Ok(())
    }
}
