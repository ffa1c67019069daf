use torpanel_common::models::{ServiceState, StatusSnapshot};

use crate::i18n::Strings;

pub const IP_PLACEHOLDER: &str = "-";

/// Display class for a status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualClass {
    Running,
    Stopped,
    Unknown,
}

impl VisualClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualClass::Running => "running",
            VisualClass::Stopped => "stopped",
            VisualClass::Unknown => "unknown",
        }
    }
}

pub fn service_class(state: &ServiceState) -> VisualClass {
    match state {
        ServiceState::Running => VisualClass::Running,
        ServiceState::Exited => VisualClass::Stopped,
        _ => VisualClass::Unknown,
    }
}

pub fn ip_text(ip: Option<&str>) -> &str {
    match ip {
        Some(ip) if !ip.is_empty() => ip,
        _ => IP_PLACEHOLDER,
    }
}

pub fn bridges_class(enabled: bool) -> VisualClass {
    if enabled { VisualClass::Running } else { VisualClass::Stopped }
}

/// One labelled value ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub text: String,
    pub class: Option<VisualClass>,
}

/// Display-ready projection of a snapshot. Pure; building it cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub tor: Field,
    pub lyrebird: Field,
    pub current_ip: Field,
    pub bridges: Field,
    pub tor_version: Option<String>,
}

impl StatusView {
    pub fn from_snapshot(snapshot: &StatusSnapshot, strings: &Strings) -> Self {
        let service = |state: &ServiceState| Field {
            text: state.as_str().to_string(),
            class: Some(service_class(state)),
        };
        Self {
            tor: service(&snapshot.tor_status),
            lyrebird: service(&snapshot.lyrebird_status),
            current_ip: Field {
                text: ip_text(snapshot.current_ip.as_deref()).to_string(),
                class: None,
            },
            bridges: Field {
                text: if snapshot.bridges_enabled {
                    strings.bridges_enabled.to_string()
                } else {
                    strings.bridges_disabled.to_string()
                },
                class: Some(bridges_class(snapshot.bridges_enabled)),
            },
            tor_version: snapshot.tor_version.clone(),
        }
    }
}
