//! Runtime settings for the control panel.
//!
//! The binary fills these from CLI flags and the environment; everything
//! downstream only ever sees a validated `Settings`.

use std::time::Duration;

use clap::ValueEnum;
use url::Url;

use crate::i18n::Locale;
use crate::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
pub const DEFAULT_REFRESH_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Where operator credentials come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CredentialSource {
    /// OS keyring, prompting once when empty.
    Keyring,
    /// Process memory only, prompting once when empty.
    Memory,
    /// `TORPANEL_USER` / `TORPANEL_PASSWORD`, never prompting.
    Env,
}

impl CredentialSource {
    /// Whether the operator may be asked for a missing pair.
    pub fn prompts(self) -> bool {
        !matches!(self, CredentialSource::Env)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: Url,
    pub poll_interval: Duration,
    pub refresh_delay: Duration,
    pub request_timeout: Duration,
    pub credential_source: CredentialSource,
    pub locale: Locale,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            poll_interval: DEFAULT_POLL_INTERVAL,
            refresh_delay: DEFAULT_REFRESH_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            credential_source: CredentialSource::Keyring,
            locale: Locale::En,
        }
    }
}

impl Settings {
    /// Builds settings from raw values, rejecting an unusable URL or zero durations.
    pub fn from_parts(
        base_url: &str,
        poll_interval_secs: u64,
        refresh_delay_secs: u64,
        request_timeout_secs: u64,
        credential_source: CredentialSource,
        locale: Locale,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(base_url.trim())?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "base URL must be http or https, got '{}'",
                base_url.scheme()
            )));
        }
        if poll_interval_secs == 0 {
            return Err(Error::Config("poll interval must be at least 1 second".into()));
        }
        if request_timeout_secs == 0 {
            return Err(Error::Config("request timeout must be at least 1 second".into()));
        }

        Ok(Self {
            base_url,
            poll_interval: Duration::from_secs(poll_interval_secs),
            refresh_delay: Duration::from_secs(refresh_delay_secs),
            request_timeout: Duration::from_secs(request_timeout_secs),
            credential_source,
            locale,
        })
    }

    /// Base URL without a trailing slash, ready for `format!("{base}{path}")`.
    pub fn api_base(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }
}
