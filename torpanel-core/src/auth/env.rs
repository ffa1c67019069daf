use tracing::debug;

use torpanel_common::models::Credentials;
use torpanel_common::traits::CredentialCache;
use torpanel_common::Error;

pub const USER_VAR: &str = "TORPANEL_USER";
pub const PASSWORD_VAR: &str = "TORPANEL_PASSWORD";

/// Read-only credentials taken from the environment when built.
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds from any variable lookup; unset and empty values are both absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |var: &str| lookup(var).filter(|v| !v.is_empty());
        Self::new(Credentials {
            username: read(USER_VAR),
            password: read(PASSWORD_VAR),
        })
    }

    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl CredentialCache for EnvCredentials {
    fn load(&self) -> Result<Credentials, Error> {
        Ok(self.credentials.clone())
    }

    fn store(&self, _credentials: &Credentials) -> Result<(), Error> {
        debug!("Ignoring credential write: environment credentials are read-only");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use crate::auth::CredentialStore;
    use crate::http::ApiClient;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[tokio::test]
    async fn env_pair_is_what_requests_encode() {
        let env = EnvCredentials::from_lookup(lookup(&[(USER_VAR, "admin"), (PASSWORD_VAR, "secret")]));
        let store = CredentialStore::cached_only(Arc::new(env));

        let resolved = store.resolve().await;
        assert_eq!(ApiClient::basic_auth_header(&resolved), "Basic YWRtaW46c2VjcmV0");
    }

    #[test]
    fn store_is_a_no_op() {
        let env = EnvCredentials::new(Credentials::new("admin", "secret"));
        env.store(&Credentials::new("root", "toor")).unwrap();
        assert_eq!(env.load().unwrap(), Credentials::new("admin", "secret"));
    }

    #[test]
    fn unset_or_empty_variables_are_absent() {
        let env = EnvCredentials::from_lookup(lookup(&[(USER_VAR, "")]));
        let creds = env.load().unwrap();
        assert_eq!(creds.username, None);
        assert_eq!(creds.password, None);
        assert!(!creds.is_complete());
    }

    #[tokio::test]
    async fn missing_env_pair_encodes_empty() {
        let store = CredentialStore::cached_only(Arc::new(EnvCredentials::from_lookup(|_| None)));
        assert_eq!(ApiClient::basic_auth_header(&store.resolve().await), "Basic Og==");
    }
}
