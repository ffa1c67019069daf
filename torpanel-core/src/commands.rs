//! Lifecycle commands against the control API.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tracing::{error, info};

use torpanel_common::models::{BridgeRequest, CommandKind, CommandResponse};
use torpanel_common::traits::Notifier;

use crate::http::{ApiClient, Method};
use crate::i18n::Strings;
use crate::outcome::{report_failure, OperationOutcome};
use crate::tasks::RefreshScheduler;
use crate::Error;

/// The operator's pending bridge line, cleared only after the backend accepts it.
#[derive(Debug, Default)]
pub struct BridgeInput {
    value: Mutex<String>,
}

impl BridgeInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, String> {
        match self.value.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn set(&self, text: impl Into<String>) {
        *self.lock() = text.into();
    }

    pub fn value(&self) -> String {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

/// Issues lifecycle commands and schedules the follow-up status refresh.
pub struct CommandDispatcher {
    client: Arc<ApiClient>,
    scheduler: Arc<RefreshScheduler>,
    notifier: Arc<dyn Notifier>,
    strings: &'static Strings,
}

impl CommandDispatcher {
    pub fn new(
        client: Arc<ApiClient>,
        scheduler: Arc<RefreshScheduler>,
        notifier: Arc<dyn Notifier>,
        strings: &'static Strings,
    ) -> Self {
        Self { client, scheduler, notifier, strings }
    }

    pub async fn start(&self) -> OperationOutcome {
        self.run(CommandKind::Start).await
    }

    pub async fn stop(&self) -> OperationOutcome {
        self.run(CommandKind::Stop).await
    }

    pub async fn restart(&self) -> OperationOutcome {
        self.run(CommandKind::Restart).await
    }

    pub async fn rotate_identity(&self) -> OperationOutcome {
        self.run(CommandKind::NewIdentity).await
    }

    /// Submits the trimmed contents of `input`. Blank input is rejected before
    /// any request and leaves `input` untouched; success clears it.
    pub async fn add_bridge(&self, input: &BridgeInput) -> OperationOutcome {
        let bridge_line = input.value().trim().to_string();
        if bridge_line.is_empty() {
            let err = Error::Validation(self.strings.bridge_required.to_string());
            self.notifier.error(&format!("{}{}", self.strings.error_prefix, err));
            return OperationOutcome::Rejected;
        }

        match self.submit_bridge(bridge_line).await {
            Ok(resp) => {
                self.notifier.message(&resp.message);
                input.clear();
                self.scheduler.schedule(CommandKind::AddBridge);
                OperationOutcome::Applied
            }
            Err(e) => {
                error!("Error adding bridge: {}", e);
                report_failure(self.notifier.as_ref(), self.strings, self.strings.bridge_failed, &e);
                OperationOutcome::Failed
            }
        }
    }

    async fn run(&self, kind: CommandKind) -> OperationOutcome {
        match self.post(kind, None).await {
            Ok(resp) => {
                info!("Command '{}' accepted: {}", kind, resp.message);
                self.notifier.message(&resp.message);
                self.scheduler.schedule(kind);
                OperationOutcome::Applied
            }
            Err(e) => {
                error!("Error running '{}': {}", kind, e);
                report_failure(self.notifier.as_ref(), self.strings, self.failure_prefix(kind), &e);
                OperationOutcome::Failed
            }
        }
    }

    async fn submit_bridge(&self, bridge_line: String) -> Result<CommandResponse, Error> {
        let body = serde_json::to_value(BridgeRequest { bridge_line })?;
        self.post(CommandKind::AddBridge, Some(body)).await
    }

    async fn post(&self, kind: CommandKind, body: Option<Value>) -> Result<CommandResponse, Error> {
        let resp: CommandResponse = self.client.call_as(kind.path(), Method::Post, body).await?;
        if !resp.success {
            info!("Backend reported '{}' as unsuccessful: {}", kind, resp.message);
        }
        Ok(resp)
    }

    fn failure_prefix(&self, kind: CommandKind) -> &'static str {
        match kind {
            CommandKind::Start => self.strings.start_failed,
            CommandKind::Stop => self.strings.stop_failed,
            CommandKind::Restart => self.strings.restart_failed,
            CommandKind::NewIdentity => self.strings.newnym_failed,
            CommandKind::AddBridge => self.strings.bridge_failed,
        }
    }
}
