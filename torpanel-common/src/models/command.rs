use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle commands the backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Start,
    Stop,
    Restart,
    /// Ask the relay for a fresh circuit (a new egress identity).
    NewIdentity,
    AddBridge,
}

impl CommandKind {
    pub const ALL: [CommandKind; 5] = [
        CommandKind::Start,
        CommandKind::Stop,
        CommandKind::Restart,
        CommandKind::NewIdentity,
        CommandKind::AddBridge,
    ];

    /// Path relative to the API base.
    pub fn path(&self) -> &'static str {
        match self {
            CommandKind::Start => "/start",
            CommandKind::Stop => "/stop",
            CommandKind::Restart => "/restart",
            CommandKind::NewIdentity => "/newnym",
            CommandKind::AddBridge => "/bridges",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Start => "start",
            CommandKind::Stop => "stop",
            CommandKind::Restart => "restart",
            CommandKind::NewIdentity => "newnym",
            CommandKind::AddBridge => "bridge",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn default_success() -> bool {
    true
}

/// Body of every lifecycle command response.
///
/// `success: false` still arrives with a 2xx status (for example a duplicate
/// bridge line); only the message is shown to the operator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommandResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// `POST /bridges` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BridgeRequest {
    pub bridge_line: String,
}
