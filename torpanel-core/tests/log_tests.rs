// torpanel-core/tests/log_tests.rs

use torpanel_common::models::{Credentials, LogTarget};
use torpanel_core::config::Settings;
use torpanel_core::http::Method;
use torpanel_core::i18n::Locale;
use torpanel_core::test_utils::{TestPanel, TEST_BASE};
use torpanel_core::OperationOutcome;

#[tokio::test]
async fn combined_logs_render_sections_in_backend_order() {
    let t = TestPanel::new();
    t.transport.respond(Method::Get, "/logs", 200, r#"{"tor": "a", "lyrebird": "b"}"#);

    assert_eq!(t.panel.load_logs(&LogTarget::All).await, OperationOutcome::Applied);
    assert_eq!(t.panel.log_pane().text(), "=== TOR ===\na\n\n=== LYREBIRD ===\nb\n\n");
    // Scrolled to the last line.
    assert_eq!(t.panel.log_pane().scroll_offset(), 5);
}

#[tokio::test]
async fn single_service_uses_logs_field() {
    let t = TestPanel::new();
    t.transport.respond(
        Method::Get,
        "/logs/tor",
        200,
        r#"{"service": "tor", "logs": "[notice] Bootstrapped 100% (done): Done"}"#,
    );

    t.panel.load_logs(&LogTarget::from("tor")).await;
    assert_eq!(t.panel.log_pane().text(), "[notice] Bootstrapped 100% (done): Done");
}

#[tokio::test]
async fn single_service_without_logs_shows_placeholder() {
    let t = TestPanel::new();
    t.transport.respond(Method::Get, "/logs/lyrebird", 200, "{}");

    assert_eq!(
        t.panel.load_logs(&LogTarget::from("lyrebird")).await,
        OperationOutcome::Applied
    );
    assert_eq!(t.panel.log_pane().text(), "No logs");
}

#[tokio::test]
async fn placeholder_follows_locale() {
    let mut settings = Settings::default();
    settings.base_url = url::Url::parse(TEST_BASE).unwrap();
    settings.locale = Locale::Ru;
    let t = TestPanel::with_settings(settings, Credentials::new("admin", "secret"));
    t.transport.respond(Method::Get, "/logs/tor", 200, "{}");

    t.panel.load_logs(&LogTarget::from("tor")).await;
    assert_eq!(t.panel.log_pane().text(), "Нет логов");
}

#[tokio::test]
async fn service_name_is_path_encoded() {
    let t = TestPanel::new();
    t.panel.load_logs(&LogTarget::from("tor proxy")).await;
    assert_eq!(
        t.transport.requests()[0].url,
        "http://panel.test/api/logs/tor%20proxy"
    );
}

#[tokio::test]
async fn failed_fetch_keeps_previous_text() {
    let t = TestPanel::new();
    t.transport
        .respond(Method::Get, "/logs", 200, r#"{"tor": "kept"}"#)
        .respond(Method::Get, "/logs", 503, "{}");

    t.panel.load_logs(&LogTarget::All).await;
    assert_eq!(t.panel.load_logs(&LogTarget::All).await, OperationOutcome::Failed);
    assert_eq!(t.panel.log_pane().text(), "=== TOR ===\nkept\n\n");
    assert_eq!(
        t.notifier.errors(),
        vec!["Error: Failed to load logs: HTTP error! status: 503".to_string()]
    );
}
