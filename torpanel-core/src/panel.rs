//! Wires the client components into one owned control panel.
//!
//! The panel owns the status snapshot, the log pane and the bridge input; a
//! display layer reads them through the accessors and drives the operations.

use std::sync::Arc;

use torpanel_common::models::{LogTarget, StatusSnapshot};
use torpanel_common::traits::Notifier;

use crate::auth::CredentialStore;
use crate::commands::{BridgeInput, CommandDispatcher};
use crate::config::Settings;
use crate::http::{ApiClient, HttpTransport};
use crate::i18n::Strings;
use crate::logs::{LogAggregator, LogPane};
use crate::outcome::OperationOutcome;
use crate::status::{StatusStore, StatusSynchronizer, StatusView};
use crate::tasks::{spawn_poll_loop, PollHandle, RefreshScheduler};
use crate::Error;

pub struct ControlPanel {
    settings: Settings,
    strings: &'static Strings,
    store: Arc<StatusStore>,
    logs: Arc<LogAggregator>,
    sync: Arc<StatusSynchronizer>,
    scheduler: Arc<RefreshScheduler>,
    dispatcher: CommandDispatcher,
    bridge_input: BridgeInput,
}

impl ControlPanel {
    pub fn new(
        settings: Settings,
        transport: Arc<dyn HttpTransport>,
        credentials: Arc<CredentialStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let strings = Strings::for_locale(settings.locale);
        let client = Arc::new(ApiClient::new(settings.api_base(), transport, credentials));
        let store = Arc::new(StatusStore::new());
        let pane = Arc::new(LogPane::new());

        let logs = Arc::new(LogAggregator::new(client.clone(), pane, notifier.clone(), strings));
        let sync = Arc::new(StatusSynchronizer::new(
            client.clone(),
            store.clone(),
            logs.clone(),
            notifier.clone(),
            strings,
        ));
        let scheduler = Arc::new(RefreshScheduler::new(sync.clone(), settings.refresh_delay));
        let dispatcher = CommandDispatcher::new(client, scheduler.clone(), notifier, strings);

        Self {
            settings,
            strings,
            store,
            logs,
            sync,
            scheduler,
            dispatcher,
            bridge_input: BridgeInput::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn strings(&self) -> &'static Strings {
        self.strings
    }

    pub fn store(&self) -> &Arc<StatusStore> {
        &self.store
    }

    pub fn log_pane(&self) -> &Arc<LogPane> {
        self.logs.pane()
    }

    pub fn bridge_input(&self) -> &BridgeInput {
        &self.bridge_input
    }

    pub fn scheduler(&self) -> &Arc<RefreshScheduler> {
        &self.scheduler
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.store.snapshot()
    }

    pub fn view(&self) -> StatusView {
        StatusView::from_snapshot(&self.store.snapshot(), self.strings)
    }

    /// Starts the periodic poll; the first refresh runs right away.
    pub fn start_polling(&self) -> PollHandle {
        spawn_poll_loop(self.sync.clone(), self.settings.poll_interval)
    }

    pub async fn refresh(&self) -> OperationOutcome {
        self.sync.refresh().await
    }

    /// Reachability check that leaves the snapshot alone.
    pub async fn ping(&self) -> Result<StatusSnapshot, Error> {
        self.sync.probe().await
    }

    pub async fn load_logs(&self, target: &LogTarget) -> OperationOutcome {
        self.logs.refresh(target).await
    }

    pub async fn start(&self) -> OperationOutcome {
        self.dispatcher.start().await
    }

    pub async fn stop(&self) -> OperationOutcome {
        self.dispatcher.stop().await
    }

    pub async fn restart(&self) -> OperationOutcome {
        self.dispatcher.restart().await
    }

    pub async fn rotate_identity(&self) -> OperationOutcome {
        self.dispatcher.rotate_identity().await
    }

    /// Submits whatever the bridge input currently holds.
    pub async fn add_bridge(&self) -> OperationOutcome {
        self.dispatcher.add_bridge(&self.bridge_input).await
    }

    /// Cancels every pending post-command refresh.
    pub fn shutdown(&self) {
        self.scheduler.cancel_all();
    }
}
