// Terminal control panel for the Tor proxy stack
use std::io::{stdout, Write};
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use torpanel_common::traits::CredentialPrompt;
use torpanel_core::auth::{self, CredentialStore};
use torpanel_core::config::{self, CredentialSource, Settings};
use torpanel_core::i18n::{Locale, Strings};
use torpanel_core::{ControlPanel, ReqwestTransport};
use torpanel_tui::{dispatch, render, InputLines, StdinPrompt, TerminalNotifier};

#[derive(Parser, Debug, Clone)]
#[command(name = "torpanel")]
#[command(author, version, about = "Control panel for a self-hosted Tor proxy stack")]
struct Args {
    /// Base URL of the control API
    #[arg(long, env = "TORPANEL_BASE_URL", default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Seconds between status polls
    #[arg(long, env = "TORPANEL_POLL_INTERVAL_SECS", default_value_t = 10)]
    poll_interval_secs: u64,

    /// Seconds to wait after a command before refreshing status
    #[arg(long, env = "TORPANEL_REFRESH_DELAY_SECS", default_value_t = 2)]
    refresh_delay_secs: u64,

    /// Per-request timeout in seconds
    #[arg(long, env = "TORPANEL_TIMEOUT_SECS", default_value_t = 15)]
    timeout_secs: u64,

    /// Where operator credentials are kept
    #[arg(long, env = "TORPANEL_CREDENTIALS", value_enum, default_value_t = CredentialSource::Keyring)]
    credentials: CredentialSource,

    /// Language for panel messages
    #[arg(long, env = "TORPANEL_LOCALE", value_enum, default_value_t = Locale::En)]
    locale: Locale,
}

impl Args {
    fn settings(&self) -> Result<Settings, torpanel_core::Error> {
        Settings::from_parts(
            &self.base_url,
            self.poll_interval_secs,
            self.refresh_delay_secs,
            self.timeout_secs,
            self.credentials,
            self.locale,
        )
    }
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("torpanel=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).with_writer(std::io::stderr).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let settings = args.settings()?;
    let strings = Strings::for_locale(settings.locale);
    info!(
        "torpanel starting. base_url={}, poll={:?}, credentials={:?}",
        settings.base_url, settings.poll_interval, settings.credential_source
    );

    let input = InputLines::stdin();

    let cache = auth::cache_for(settings.credential_source);
    let prompt: Option<Arc<dyn CredentialPrompt>> = if settings.credential_source.prompts() {
        Some(Arc::new(StdinPrompt::new(input.clone(), strings)))
    } else {
        None
    };

    // Resolve once, interactively, before anything runs in the background.
    // Requests after this point only read the cache, whose memory layer keeps
    // the supplied pair even if the keyring write failed.
    let interactive = CredentialStore::new(cache.clone(), prompt);
    if !interactive.resolve().await.is_complete() {
        warn!("Running without complete credentials; the backend will reject requests");
    }
    let credentials = Arc::new(CredentialStore::cached_only(cache));

    let transport = Arc::new(ReqwestTransport::new(settings.request_timeout)?);
    let panel = ControlPanel::new(settings, transport, credentials, Arc::new(TerminalNotifier::new()));

    println!("Tor proxy control panel ({})", panel.settings().api_base());
    println!("Type 'help' for available commands.\n");

    let poll = panel.start_polling();

    let mut status_rx = panel.store().subscribe();
    let status_watcher = tokio::spawn(async move {
        while status_rx.changed().await.is_ok() {
            let snapshot = status_rx.borrow_and_update().clone();
            let view = torpanel_core::status::StatusView::from_snapshot(&snapshot, strings);
            println!("{}", render::render_status_line(&view));
        }
    });

    loop {
        print!("torpanel> ");
        stdout().flush()?;

        let line = match input.next_line().await? {
            Some(line) => line.trim().to_string(),
            None => break, // EOF
        };

        if line.is_empty() {
            continue;
        }

        let (quit_requested, output) = dispatch(&line, &panel, &poll).await;

        if let Some(msg) = output {
            println!("{}", msg);
        }

        if quit_requested {
            break;
        }
    }

    poll.shutdown().await;
    panel.shutdown();
    status_watcher.abort();

    println!("Goodbye!");
    Ok(())
}
