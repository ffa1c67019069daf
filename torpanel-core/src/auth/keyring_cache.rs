use keyring::Entry;
use tracing::{debug, trace};

use torpanel_common::models::{CredentialField, Credentials};
use torpanel_common::traits::CredentialCache;
use torpanel_common::Error;

pub const DEFAULT_SERVICE: &str = "torpanel";

/// Persists the credential pair in the OS keyring, one entry per field,
/// under the fixed `torProxyUsername` / `torProxyPassword` keys.
pub struct KeyringCache {
    service: String,
}

impl KeyringCache {
    pub fn new(service: impl Into<String>) -> Self {
        Self { service: service.into() }
    }

    fn entry(&self, field: CredentialField) -> Result<Entry, Error> {
        Ok(Entry::new(&self.service, field.cache_key())?)
    }

    fn read(&self, field: CredentialField) -> Result<Option<String>, Error> {
        match self.entry(field)?.get_password() {
            Ok(value) => {
                trace!("Keyring hit for {}", field.cache_key());
                Ok(Some(value))
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No keyring entry for {}", field.cache_key());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, field: CredentialField, value: Option<&str>) -> Result<(), Error> {
        match value {
            Some(v) => Ok(self.entry(field)?.set_password(v)?),
            None => Ok(()),
        }
    }
}

impl Default for KeyringCache {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE)
    }
}

impl CredentialCache for KeyringCache {
    fn load(&self) -> Result<Credentials, Error> {
        Ok(Credentials {
            username: self.read(CredentialField::Username)?,
            password: self.read(CredentialField::Password)?,
        })
    }

    fn store(&self, credentials: &Credentials) -> Result<(), Error> {
        self.write(CredentialField::Username, credentials.username.as_deref())?;
        self.write(CredentialField::Password, credentials.password.as_deref())
    }
}
