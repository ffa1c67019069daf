// torpanel-core/tests/command_tests.rs

use std::time::Duration;

use serde_json::json;
use torpanel_common::models::CommandKind;
use torpanel_core::http::Method;
use torpanel_core::test_utils::TestPanel;
use torpanel_core::OperationOutcome;

const STATUS: &str = r#"{"tor_status": "running", "lyrebird_status": "running", "current_ip": "1.1.1.1", "bridges_enabled": true}"#;

async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

fn scripted(t: &TestPanel) {
    t.transport
        .respond(Method::Post, "/start", 200, r#"{"success": true, "message": "Services started"}"#)
        .respond(Method::Post, "/stop", 200, r#"{"success": true, "message": "Services stopped"}"#)
        .respond(Method::Post, "/restart", 200, r#"{"success": true, "message": "Services restarted"}"#)
        .respond(Method::Post, "/newnym", 200, r#"{"success": true, "message": "New identity requested"}"#)
        .respond(Method::Get, "/status", 200, STATUS)
        .respond(Method::Get, "/logs", 200, r#"{"tor": "a"}"#);
}

#[tokio::test(start_paused = true)]
async fn successful_commands_surface_message_and_refresh_after_delay() {
    let t = TestPanel::new();
    scripted(&t);

    assert_eq!(t.panel.start().await, OperationOutcome::Applied);
    assert_eq!(t.notifier.messages(), vec!["Services started".to_string()]);
    assert!(t.panel.scheduler().is_pending(CommandKind::Start));
    settle().await;

    tokio::time::advance(Duration::from_millis(1900)).await;
    settle().await;
    assert_eq!(t.transport.count(Method::Get, "/status"), 0);

    tokio::time::advance(Duration::from_millis(100)).await;
    settle().await;
    assert_eq!(t.transport.count(Method::Get, "/status"), 1);
    assert_eq!(t.transport.count(Method::Get, "/logs"), 1);
    assert_eq!(t.panel.snapshot().current_ip.as_deref(), Some("1.1.1.1"));
}

#[tokio::test(start_paused = true)]
async fn each_lifecycle_command_posts_to_its_route_without_body() {
    let t = TestPanel::new();
    scripted(&t);

    t.panel.stop().await;
    t.panel.restart().await;
    t.panel.rotate_identity().await;

    let posts: Vec<_> = t
        .transport
        .requests()
        .into_iter()
        .filter(|r| r.method == Method::Post)
        .collect();
    let urls: Vec<_> = posts.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        [
            "http://panel.test/api/stop",
            "http://panel.test/api/restart",
            "http://panel.test/api/newnym",
        ]
    );
    assert!(posts.iter().all(|r| r.body.is_none()));
    assert_eq!(t.panel.scheduler().pending_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn failed_command_reports_and_schedules_nothing() {
    let t = TestPanel::new();
    t.transport.respond(Method::Post, "/restart", 500, r#"{"detail": "boom"}"#);

    assert_eq!(t.panel.restart().await, OperationOutcome::Failed);
    assert_eq!(
        t.notifier.errors(),
        vec!["Error: Failed to restart services: HTTP error! status: 500".to_string()]
    );
    assert_eq!(t.panel.scheduler().pending_count(), 0);

    tokio::time::advance(Duration::from_secs(10)).await;
    settle().await;
    assert_eq!(t.transport.count(Method::Get, "/status"), 0);
}

#[tokio::test(start_paused = true)]
async fn rapid_repeats_collapse_into_one_refresh() {
    let t = TestPanel::new();
    scripted(&t);

    for _ in 0..3 {
        t.panel.rotate_identity().await;
        settle().await;
    }
    assert_eq!(t.panel.scheduler().pending_count(), 1);

    tokio::time::advance(Duration::from_secs(3)).await;
    settle().await;
    assert_eq!(t.transport.count(Method::Get, "/status"), 1);
}

#[tokio::test(start_paused = true)]
async fn blank_bridge_line_is_rejected_locally() {
    let t = TestPanel::new();

    for blank in ["", "   "] {
        t.panel.bridge_input().set(blank);
        assert_eq!(t.panel.add_bridge().await, OperationOutcome::Rejected);
        assert_eq!(t.panel.bridge_input().value(), blank);
    }

    assert_eq!(t.transport.request_count(), 0);
    assert_eq!(t.panel.scheduler().pending_count(), 0);
    assert_eq!(
        t.notifier.errors(),
        vec!["Error: Enter a bridge configuration line".to_string(); 2]
    );
}

#[tokio::test(start_paused = true)]
async fn accepted_bridge_clears_input_and_schedules_one_refresh() {
    let t = TestPanel::new();
    t.transport
        .respond(
            Method::Post,
            "/bridges",
            200,
            r#"{"success": true, "message": "Bridge added successfully and Tor restarted"}"#,
        )
        .respond(Method::Get, "/status", 200, STATUS)
        .respond(Method::Get, "/logs", 200, "{}");

    t.panel
        .bridge_input()
        .set("  Bridge obfs4 1.2.3.4:443 ABCDEF cert=xyz iat-mode=0  ");
    assert_eq!(t.panel.add_bridge().await, OperationOutcome::Applied);

    let posted = &t.transport.requests()[0];
    assert_eq!(
        posted.body,
        Some(json!({"bridge_line": "Bridge obfs4 1.2.3.4:443 ABCDEF cert=xyz iat-mode=0"}))
    );
    assert_eq!(t.panel.bridge_input().value(), "");
    assert_eq!(
        t.notifier.messages(),
        vec!["Bridge added successfully and Tor restarted".to_string()]
    );
    assert_eq!(t.panel.scheduler().pending_count(), 1);
    settle().await;

    tokio::time::advance(Duration::from_secs(2)).await;
    settle().await;
    assert_eq!(t.transport.count(Method::Get, "/status"), 1);
}

#[tokio::test(start_paused = true)]
async fn rejected_bridge_keeps_input() {
    let t = TestPanel::new();
    t.transport.respond(Method::Post, "/bridges", 422, r#"{"detail": "invalid"}"#);

    t.panel.bridge_input().set("Bridge obfs4 1.2.3.4:443");
    assert_eq!(t.panel.add_bridge().await, OperationOutcome::Failed);
    assert_eq!(t.panel.bridge_input().value(), "Bridge obfs4 1.2.3.4:443");
    assert_eq!(t.panel.scheduler().pending_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn duplicate_bridge_message_is_shown_and_refresh_still_scheduled() {
    let t = TestPanel::new();
    t.transport.respond(
        Method::Post,
        "/bridges",
        200,
        r#"{"success": false, "message": "Bridge already exists in configuration"}"#,
    );

    t.panel.bridge_input().set("Bridge obfs4 1.2.3.4:443");
    assert_eq!(t.panel.add_bridge().await, OperationOutcome::Applied);
    assert_eq!(
        t.notifier.messages(),
        vec!["Bridge already exists in configuration".to_string()]
    );
    assert_eq!(t.panel.scheduler().pending_count(), 1);
}
