// File: torpanel-core/src/test_utils.rs
//
// In-memory stand-ins for the backend and the operator, shared by unit and
// integration tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use torpanel_common::models::{CredentialField, Credentials};
use torpanel_common::traits::{CredentialCache, CredentialPrompt, Notifier};

use crate::auth::{CredentialStore, MemoryCache};
use crate::config::Settings;
use crate::http::{ApiRequest, ApiResponse, HttpTransport, Method};
use crate::outcome::OperationOutcome;
use crate::panel::ControlPanel;
use crate::tasks::Refresher;
use crate::Error;

pub const TEST_BASE: &str = "http://panel.test/api";

#[derive(Debug, Clone)]
struct Scripted {
    status: u16,
    body: String,
    delay: Duration,
    transport_error: Option<String>,
}

/// Backend double. Responses are queued per `(method, path)`; the last one
/// for a route repeats. Unscripted routes answer 404. Every request is recorded.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Scripted>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        self.respond_after(method, path, Duration::ZERO, status, body)
    }

    pub fn respond_after(
        &self,
        method: Method,
        path: &str,
        delay: Duration,
        status: u16,
        body: &str,
    ) -> &Self {
        self.push(
            method,
            path,
            Scripted { status, body: body.to_string(), delay, transport_error: None },
        );
        self
    }

    pub fn fail(&self, method: Method, path: &str, message: &str) -> &Self {
        self.push(
            method,
            path,
            Scripted {
                status: 0,
                body: String::new(),
                delay: Duration::ZERO,
                transport_error: Some(message.to_string()),
            },
        );
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Number of recorded requests for one route.
    pub fn count(&self, method: Method, path: &str) -> usize {
        let url = format!("{}{}", TEST_BASE, path);
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }

    fn next(&self, method: Method, path: &str) -> Option<Scripted> {
        let mut routes = self.routes.lock().unwrap();
        let queue = routes.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 { queue.pop_front() } else { queue.front().cloned() }
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        self.requests.lock().unwrap().push(request.clone());

        let path = request.url.strip_prefix(TEST_BASE).unwrap_or(&request.url).to_string();
        let Some(scripted) = self.next(request.method, &path) else {
            return Ok(ApiResponse { status: 404, body: r#"{"detail": "Not Found"}"#.into() });
        };

        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        if let Some(message) = scripted.transport_error {
            return Err(Error::Transport(message));
        }
        Ok(ApiResponse { status: scripted.status, body: scripted.body })
    }
}

/// Operator double answering prompts from a fixed script.
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<Option<String>>>,
    asked: AtomicUsize,
}

impl ScriptedPrompt {
    pub fn new<'a>(answers: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().map(|a| a.map(str::to_string)).collect()),
            asked: AtomicUsize::new(0),
        }
    }

    pub fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialPrompt for ScriptedPrompt {
    async fn ask(&self, _field: CredentialField) -> Result<Option<String>, Error> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        Ok(self.answers.lock().unwrap().pop_front().flatten())
    }
}

/// A durable cache with no working backend: every read and write fails.
pub struct FailingCache;

impl CredentialCache for FailingCache {
    fn load(&self) -> Result<Credentials, Error> {
        Err(Error::Keyring("no keyring backend available".into()))
    }

    fn store(&self, _credentials: &Credentials) -> Result<(), Error> {
        Err(Error::Keyring("no keyring backend available".into()))
    }
}

/// Notifier double keeping everything it was asked to show.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn message(&self, text: &str) {
        self.messages.lock().unwrap().push(text.to_string());
    }

    fn error(&self, text: &str) {
        self.errors.lock().unwrap().push(text.to_string());
    }
}

/// Refresher double that only counts.
#[derive(Default)]
pub struct CountingRefresher {
    calls: AtomicUsize,
}

impl CountingRefresher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Refresher for CountingRefresher {
    async fn refresh(&self) -> OperationOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        OperationOutcome::Applied
    }
}

/// Panel wired to scripted doubles, with `admin:secret` already cached.
pub struct TestPanel {
    pub panel: ControlPanel,
    pub transport: Arc<ScriptedTransport>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestPanel {
    pub fn new() -> Self {
        Self::with_credentials(Credentials::new("admin", "secret"))
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        let mut settings = Settings::default();
        settings.base_url = url::Url::parse(TEST_BASE).expect("test base URL is valid");
        Self::with_settings(settings, credentials)
    }

    pub fn with_settings(settings: Settings, credentials: Credentials) -> Self {
        let transport = Arc::new(ScriptedTransport::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let store = CredentialStore::cached_only(Arc::new(MemoryCache::with(credentials)));
        let panel = ControlPanel::new(settings, transport.clone(), Arc::new(store), notifier.clone());
        Self { panel, transport, notifier }
    }
}

impl Default for TestPanel {
    fn default() -> Self {
        Self::new()
    }
}
