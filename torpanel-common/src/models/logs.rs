use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::Error;

/// Sentinel selecting the combined log view.
pub const ALL_SERVICES: &str = "all";

/// What a log fetch asks the backend for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTarget {
    All,
    Service(String),
}

impl LogTarget {
    pub fn as_str(&self) -> &str {
        match self {
            LogTarget::All => ALL_SERVICES,
            LogTarget::Service(name) => name,
        }
    }
}

impl From<&str> for LogTarget {
    fn from(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_SERVICES) {
            LogTarget::All
        } else {
            LogTarget::Service(trimmed.to_string())
        }
    }
}

impl FromStr for LogTarget {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(LogTarget::from(s))
    }
}

impl fmt::Display for LogTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw log text as returned by the backend. Recomputed on every fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogBundle {
    /// service name -> text, in the order the backend listed them.
    Combined(Vec<(String, String)>),
    /// Text for a single service; `None` when the response carried nothing usable.
    Single(Option<String>),
}

impl LogBundle {
    /// Decodes a `GET /logs` body: a JSON object mapping service name to text.
    pub fn combined_from_json(body: Value) -> Result<Self, Error> {
        match body {
            Value::Object(map) => Ok(LogBundle::Combined(
                map.into_iter()
                    .map(|(name, text)| (name, value_text(text)))
                    .collect(),
            )),
            other => Err(Error::Validation(format!(
                "expected a JSON object of service logs, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Decodes a `GET /logs/{service}` body. Looks at `logs` first, then at the
    /// field named after the service; empty text counts as missing.
    pub fn single_from_json(service: &str, body: &Value) -> Self {
        let pick = |key: &str| {
            body.get(key)
                .cloned()
                .map(value_text)
                .filter(|text| !text.is_empty())
        };
        LogBundle::Single(pick("logs").or_else(|| pick(service)))
    }
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
