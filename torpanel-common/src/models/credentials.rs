use std::fmt;

/// Which half of the operator credential pair a prompt is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialField {
    Username,
    Password,
}

impl CredentialField {
    /// Fixed key the field is cached under.
    pub fn cache_key(&self) -> &'static str {
        match self {
            CredentialField::Username => "torProxyUsername",
            CredentialField::Password => "torProxyPassword",
        }
    }
}

/// Operator credentials for the control API.
///
/// Either field may be absent when the operator declined the prompt; such a
/// pair is still encoded and sent, the backend then rejects it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Both fields present and non-empty.
    pub fn is_complete(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        filled(&self.username) && filled(&self.password)
    }

    /// `user:pass`, with absent fields rendered as empty strings.
    pub fn basic_pair(&self) -> String {
        format!(
            "{}:{}",
            self.username.as_deref().unwrap_or_default(),
            self.password.as_deref().unwrap_or_default()
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
