use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use torpanel_common::models::Credentials;
use torpanel_common::traits::CredentialCache;
use torpanel_common::Error;

use crate::auth::MemoryCache;

/// A memory layer in front of a durable cache.
///
/// The durable cache is read once, on the first `load`; every later read is
/// served from memory. Writes land in memory first, so a pair the operator
/// supplied stays in use for the session even when the durable write fails.
pub struct LayeredCache {
    front: MemoryCache,
    backing: Arc<dyn CredentialCache>,
    warmed: OnceLock<()>,
}

impl LayeredCache {
    pub fn new(backing: Arc<dyn CredentialCache>) -> Self {
        Self {
            front: MemoryCache::new(),
            backing,
            warmed: OnceLock::new(),
        }
    }

    fn warm(&self) {
        self.warmed.get_or_init(|| match self.backing.load() {
            Ok(creds) => {
                if let Err(e) = self.front.store(&creds) {
                    warn!("Could not seed memory credential layer: {}", e);
                }
            }
            Err(e) => warn!("Durable credential cache unavailable, using memory only: {}", e),
        });
    }
}

impl CredentialCache for LayeredCache {
    fn load(&self) -> Result<Credentials, Error> {
        self.warm();
        self.front.load()
    }

    fn store(&self, credentials: &Credentials) -> Result<(), Error> {
        self.warm();
        self.front.store(credentials)?;
        debug!("Credentials held in memory; writing through to durable cache");
        self.backing.store(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::CredentialStore;
    use crate::http::ApiClient;
    use crate::test_utils::{FailingCache, ScriptedPrompt};

    #[tokio::test]
    async fn supplied_pair_survives_failed_durable_write() {
        let cache: Arc<dyn CredentialCache> = Arc::new(LayeredCache::new(Arc::new(FailingCache)));
        let prompt = Arc::new(ScriptedPrompt::new([Some("admin"), Some("secret")]));

        let interactive = CredentialStore::new(cache.clone(), Some(prompt));
        assert!(interactive.resolve().await.is_complete());

        let per_request = CredentialStore::cached_only(cache);
        let resolved = per_request.resolve().await;
        assert_eq!(resolved, Credentials::new("admin", "secret"));
        assert_eq!(ApiClient::basic_auth_header(&resolved), "Basic YWRtaW46c2VjcmV0");
    }

    #[test]
    fn durable_pair_is_read_once() {
        let backing = Arc::new(MemoryCache::with(Credentials::new("admin", "secret")));
        let cache = LayeredCache::new(backing.clone());

        assert_eq!(cache.load().unwrap(), Credentials::new("admin", "secret"));
        backing.store(&Credentials::new("other", "other")).unwrap();
        assert_eq!(cache.load().unwrap(), Credentials::new("admin", "secret"));
    }

    #[test]
    fn writes_go_through_to_backing() {
        let backing = Arc::new(MemoryCache::new());
        let cache = LayeredCache::new(backing.clone());

        cache.store(&Credentials::new("root", "toor")).unwrap();
        assert_eq!(backing.load().unwrap(), Credentials::new("root", "toor"));
        assert_eq!(cache.load().unwrap(), Credentials::new("root", "toor"));
    }

    #[test]
    fn failed_backing_write_is_reported_but_kept_in_memory() {
        let cache = LayeredCache::new(Arc::new(FailingCache));

        assert!(matches!(
            cache.store(&Credentials::new("admin", "secret")),
            Err(Error::Keyring(_))
        ));
        assert_eq!(cache.load().unwrap(), Credentials::new("admin", "secret"));
    }
}
