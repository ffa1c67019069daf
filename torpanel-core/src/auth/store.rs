use std::sync::Arc;

use tracing::{debug, info, warn};

use torpanel_common::models::{CredentialField, Credentials};
use torpanel_common::traits::{CredentialCache, CredentialPrompt};

/// Resolves the operator credential pair for every outbound call.
///
/// Resolution never fails: cache errors are treated as a miss and a declined
/// prompt yields an incomplete pair, which the caller encodes as-is.
pub struct CredentialStore {
    cache: Arc<dyn CredentialCache>,
    prompt: Option<Arc<dyn CredentialPrompt>>,
}

impl CredentialStore {
    pub fn new(cache: Arc<dyn CredentialCache>, prompt: Option<Arc<dyn CredentialPrompt>>) -> Self {
        Self { cache, prompt }
    }

    /// A store that only ever reads the cache.
    pub fn cached_only(cache: Arc<dyn CredentialCache>) -> Self {
        Self::new(cache, None)
    }

    pub fn can_prompt(&self) -> bool {
        self.prompt.is_some()
    }

    /// Cached pair if both halves are present; otherwise asks for both and
    /// caches them only when both were supplied.
    pub async fn resolve(&self) -> Credentials {
        let cached = match self.cache.load() {
            Ok(creds) => creds,
            Err(e) => {
                warn!("Credential cache read failed, treating as empty: {}", e);
                Credentials::default()
            }
        };

        if cached.is_complete() {
            return cached;
        }

        let Some(prompt) = &self.prompt else {
            debug!("Credentials incomplete and no prompt available; sending what is cached");
            return cached;
        };

        let username = ask(prompt.as_ref(), CredentialField::Username).await;
        let password = ask(prompt.as_ref(), CredentialField::Password).await;
        let supplied = Credentials { username, password };

        if supplied.is_complete() {
            match self.cache.store(&supplied) {
                Ok(()) => info!("Stored operator credentials in cache"),
                Err(e) => warn!("Could not cache operator credentials: {}", e),
            }
        } else {
            info!("Operator declined to supply credentials; continuing without caching");
        }

        supplied
    }
}

async fn ask(prompt: &dyn CredentialPrompt, field: CredentialField) -> Option<String> {
    match prompt.ask(field).await {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(e) => {
            warn!("Credential prompt for {:?} failed: {}", field, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryCache;
    use crate::test_utils::ScriptedPrompt;

    #[tokio::test]
    async fn cached_pair_skips_prompt() {
        let cache = Arc::new(MemoryCache::with(Credentials::new("admin", "secret")));
        let prompt = Arc::new(ScriptedPrompt::new([Some("other"), Some("other")]));
        let store = CredentialStore::new(cache, Some(prompt.clone()));

        assert_eq!(store.resolve().await, Credentials::new("admin", "secret"));
        assert_eq!(prompt.asked(), 0);
    }

    #[tokio::test]
    async fn half_cached_pair_prompts_for_both() {
        let cache = Arc::new(MemoryCache::with(Credentials {
            username: Some("admin".into()),
            password: None,
        }));
        let prompt = Arc::new(ScriptedPrompt::new([Some("root"), Some("toor")]));
        let store = CredentialStore::new(cache.clone(), Some(prompt.clone()));

        assert_eq!(store.resolve().await, Credentials::new("root", "toor"));
        assert_eq!(prompt.asked(), 2);
        assert_eq!(cache.load().unwrap(), Credentials::new("root", "toor"));
    }

    #[tokio::test]
    async fn declined_prompt_returns_incomplete_pair_uncached() {
        let cache = Arc::new(MemoryCache::new());
        let prompt = Arc::new(ScriptedPrompt::new([Some("admin"), Some("")]));
        let store = CredentialStore::new(cache.clone(), Some(prompt));

        let resolved = store.resolve().await;
        assert_eq!(resolved.username.as_deref(), Some("admin"));
        assert_eq!(resolved.password, None);
        assert_eq!(cache.load().unwrap(), Credentials::default());
    }

    #[tokio::test]
    async fn no_prompt_returns_cache_contents() {
        let store = CredentialStore::cached_only(Arc::new(MemoryCache::new()));
        assert!(!store.can_prompt());
        assert_eq!(store.resolve().await, Credentials::default());
    }
}
