use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of one backend service as reported by `GET /status`.
///
/// The backend forwards raw container states, so anything other than
/// `running`/`exited`/`unknown` is kept verbatim in `Other` instead of failing
/// the decode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum ServiceState {
    Running,
    Exited,
    #[default]
    Unknown,
    Other(String),
}

impl ServiceState {
    pub fn as_str(&self) -> &str {
        match self {
            ServiceState::Running => "running",
            ServiceState::Exited => "exited",
            ServiceState::Unknown => "unknown",
            ServiceState::Other(raw) => raw.as_str(),
        }
    }
}

impl From<&str> for ServiceState {
    fn from(raw: &str) -> Self {
        match raw {
            "running" => ServiceState::Running,
            "exited" => ServiceState::Exited,
            "unknown" => ServiceState::Unknown,
            other => ServiceState::Other(other.to_string()),
        }
    }
}

impl From<Option<String>> for ServiceState {
    fn from(raw: Option<String>) -> Self {
        match raw {
            Some(s) => ServiceState::from(s.as_str()),
            None => ServiceState::Unknown,
        }
    }
}

impl From<ServiceState> for String {
    fn from(state: ServiceState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The latest known state of the relay and its transport helper.
///
/// Replaced whole on every successful poll, never merged field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    #[serde(default)]
    pub tor_status: ServiceState,
    #[serde(default)]
    pub lyrebird_status: ServiceState,
    #[serde(default)]
    pub current_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tor_version: Option<String>,
    #[serde(default)]
    pub bridges_enabled: bool,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            tor_status: ServiceState::Unknown,
            lyrebird_status: ServiceState::Unknown,
            current_ip: None,
            tor_version: None,
            bridges_enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_payload() {
        let raw = r#"{
            "tor_status": "running",
            "lyrebird_status": "restarting",
            "current_ip": "185.220.101.4",
            "tor_version": "0.4.8.10",
            "bridges_enabled": true
        }"#;
        let snap: StatusSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snap.tor_status, ServiceState::Running);
        assert_eq!(snap.lyrebird_status, ServiceState::Other("restarting".into()));
        assert_eq!(snap.current_ip.as_deref(), Some("185.220.101.4"));
        assert_eq!(snap.tor_version.as_deref(), Some("0.4.8.10"));
        assert!(snap.bridges_enabled);
    }

    #[test]
    fn missing_and_null_fields_fall_back_to_unknown() {
        let snap: StatusSnapshot =
            serde_json::from_str(r#"{"tor_status": null, "current_ip": null}"#).unwrap();
        assert_eq!(snap, StatusSnapshot::default());
    }
}
