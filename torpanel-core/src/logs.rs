//! Log fetching and formatting.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, error};

use torpanel_common::models::{LogBundle, LogTarget};
use torpanel_common::traits::Notifier;

use crate::http::{ApiClient, Method};
use crate::i18n::Strings;
use crate::outcome::{report_failure, OperationOutcome};
use crate::Error;

pub const LOGS_PATH: &str = "/logs";

/// Renders a bundle as display text.
///
/// Combined bundles become one `=== NAME ===` section per service, each
/// followed by a blank line, in backend order.
pub fn format_bundle(bundle: &LogBundle, strings: &Strings) -> String {
    match bundle {
        LogBundle::Combined(entries) => entries
            .iter()
            .map(|(name, text)| format!("=== {} ===\n{}\n\n", name.to_uppercase(), text))
            .collect(),
        LogBundle::Single(Some(text)) => text.clone(),
        LogBundle::Single(None) => strings.no_logs.to_string(),
    }
}

#[derive(Debug, Default)]
struct PaneState {
    text: String,
    scroll: usize,
}

/// The log display: current text plus scroll position (first visible line).
#[derive(Debug, Default)]
pub struct LogPane {
    state: Mutex<PaneState>,
}

impl LogPane {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, PaneState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Replaces the text and scrolls so the newest line is visible.
    pub fn show(&self, text: String) {
        let mut state = self.lock();
        state.scroll = text.lines().count().saturating_sub(1);
        state.text = text;
    }

    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    pub fn scroll_offset(&self) -> usize {
        self.lock().scroll
    }

    /// The last `n` lines, as a terminal would show them after scrolling down.
    pub fn tail(&self, n: usize) -> String {
        let state = self.lock();
        let lines: Vec<&str> = state.text.lines().collect();
        let start = lines.len().saturating_sub(n);
        lines[start..].join("\n")
    }
}

/// Fetches and formats logs into a [`LogPane`].
pub struct LogAggregator {
    client: Arc<ApiClient>,
    pane: Arc<LogPane>,
    notifier: Arc<dyn Notifier>,
    strings: &'static Strings,
}

impl LogAggregator {
    pub fn new(
        client: Arc<ApiClient>,
        pane: Arc<LogPane>,
        notifier: Arc<dyn Notifier>,
        strings: &'static Strings,
    ) -> Self {
        Self { client, pane, notifier, strings }
    }

    pub fn pane(&self) -> &Arc<LogPane> {
        &self.pane
    }

    pub async fn fetch(&self, target: &LogTarget) -> Result<LogBundle, Error> {
        match target {
            LogTarget::All => {
                let body = self.client.call(LOGS_PATH, Method::Get, None).await?;
                LogBundle::combined_from_json(body)
            }
            LogTarget::Service(service) => {
                let path = format!("{}/{}", LOGS_PATH, urlencoding::encode(service));
                let body = self.client.call(&path, Method::Get, None).await?;
                Ok(LogBundle::single_from_json(service, &body))
            }
        }
    }

    /// Fetches, formats and shows logs for `target`. On failure the pane keeps
    /// whatever it showed before.
    pub async fn refresh(&self, target: &LogTarget) -> OperationOutcome {
        match self.fetch(target).await {
            Ok(bundle) => {
                let text = format_bundle(&bundle, self.strings);
                debug!("Loaded {} bytes of logs for '{}'", text.len(), target);
                self.pane.show(text);
                OperationOutcome::Applied
            }
            Err(e) => {
                error!("Error loading logs for '{}': {}", target, e);
                report_failure(self.notifier.as_ref(), self.strings, self.strings.logs_failed, &e);
                OperationOutcome::Failed
            }
        }
    }
}
