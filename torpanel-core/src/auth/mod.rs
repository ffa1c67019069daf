//! Credential resolution for the control API.
//!
//! `CredentialStore` is the only thing the request layer talks to. How the
//! pair is cached (keyring, memory, environment) and whether the operator can
//! be asked for it are both decided when the store is built.

pub mod env;
pub mod keyring_cache;
pub mod layered;
pub mod memory;
pub mod store;

pub use env::EnvCredentials;
pub use keyring_cache::KeyringCache;
pub use layered::LayeredCache;
pub use memory::MemoryCache;
pub use store::CredentialStore;
pub use torpanel_common::traits::{CredentialCache, CredentialPrompt};

use std::sync::Arc;

use crate::config::CredentialSource;

/// The cache a credential source reads from. The keyring sits behind a memory
/// layer so it is touched once per session, not on every request.
pub fn cache_for(source: CredentialSource) -> Arc<dyn CredentialCache> {
    match source {
        CredentialSource::Keyring => Arc::new(LayeredCache::new(Arc::new(KeyringCache::default()))),
        CredentialSource::Memory => Arc::new(MemoryCache::new()),
        CredentialSource::Env => Arc::new(EnvCredentials::from_env()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use torpanel_common::models::Credentials;

    #[test]
    fn memory_source_keeps_what_is_stored() {
        let cache = cache_for(CredentialSource::Memory);
        cache.store(&Credentials::new("admin", "secret")).unwrap();
        assert_eq!(cache.load().unwrap(), Credentials::new("admin", "secret"));
    }

    #[test]
    fn env_source_ignores_writes() {
        let cache = cache_for(CredentialSource::Env);
        let before = cache.load().unwrap();
        cache.store(&Credentials::new("written-by-test", "written-by-test")).unwrap();
        assert_eq!(cache.load().unwrap(), before);
    }

    #[test]
    fn only_env_source_never_prompts() {
        assert!(CredentialSource::Keyring.prompts());
        assert!(CredentialSource::Memory.prompts());
        assert!(!CredentialSource::Env.prompts());
    }
}
