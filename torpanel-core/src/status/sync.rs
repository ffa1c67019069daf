use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use torpanel_common::models::{LogTarget, StatusSnapshot};
use torpanel_common::traits::Notifier;

use crate::http::{ApiClient, Method};
use crate::i18n::Strings;
use crate::logs::LogAggregator;
use crate::outcome::{report_failure, OperationOutcome};
use crate::status::store::StatusStore;
use crate::tasks::Refresher;
use crate::Error;

pub const STATUS_PATH: &str = "/status";

/// Pulls `GET /status` into the [`StatusStore`] and refreshes the combined
/// log view in the same cycle.
pub struct StatusSynchronizer {
    client: Arc<ApiClient>,
    store: Arc<StatusStore>,
    logs: Arc<LogAggregator>,
    notifier: Arc<dyn Notifier>,
    strings: &'static Strings,
}

impl StatusSynchronizer {
    pub fn new(
        client: Arc<ApiClient>,
        store: Arc<StatusStore>,
        logs: Arc<LogAggregator>,
        notifier: Arc<dyn Notifier>,
        strings: &'static Strings,
    ) -> Self {
        Self { client, store, logs, notifier, strings }
    }

    pub fn store(&self) -> &Arc<StatusStore> {
        &self.store
    }

    /// Fetches the backend status without touching the snapshot.
    pub async fn probe(&self) -> Result<StatusSnapshot, Error> {
        self.client.call_as(STATUS_PATH, Method::Get, None).await
    }

    /// One refresh cycle. A failure leaves the snapshot and the log pane as
    /// they were and is reported to the operator. A superseded cycle leaves
    /// the log pane to the newer one.
    pub async fn refresh(&self) -> OperationOutcome {
        let ticket = self.store.begin_refresh();

        let snapshot = match self.probe().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Error loading status: {}", e);
                report_failure(self.notifier.as_ref(), self.strings, self.strings.status_failed, &e);
                return OperationOutcome::Failed;
            }
        };

        debug!(
            "Status: tor={} lyrebird={} ip={:?} bridges={}",
            snapshot.tor_status, snapshot.lyrebird_status, snapshot.current_ip, snapshot.bridges_enabled
        );
        if !self.store.apply(ticket, snapshot) {
            debug!("Status response superseded by a newer refresh; skipping log refresh");
            return OperationOutcome::Superseded;
        }

        self.logs.refresh(&LogTarget::All).await;
        OperationOutcome::Applied
    }
}

#[async_trait]
impl Refresher for StatusSynchronizer {
    async fn refresh(&self) -> OperationOutcome {
        StatusSynchronizer::refresh(self).await
    }
}
