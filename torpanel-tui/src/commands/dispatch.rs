use torpanel_common::models::LogTarget;
use torpanel_core::tasks::PollHandle;
use torpanel_core::{ControlPanel, OperationOutcome};

use crate::help;
use crate::render;

/// Runs one input line. Returns whether the operator asked to quit, plus any
/// text to print. Notifications from the panel itself are printed by the
/// notifier, not returned here.
pub async fn dispatch(
    line: &str,
    panel: &ControlPanel,
    poll: &PollHandle,
) -> (bool, Option<String>) {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return (false, None);
    }
    let cmd = parts[0].to_lowercase();
    let args = &parts[1..];

    match cmd.as_str() {
        "help" => {
            let subcmd = args.first().copied().unwrap_or("");
            (false, Some(help::show_command_help(subcmd)))
        }

        "status" => (false, Some(render::render_status(&panel.view()))),

        "refresh" => match panel.refresh().await {
            OperationOutcome::Applied => (false, Some(render::render_status(&panel.view()))),
            _ => (false, None),
        },

        "start" => {
            panel.start().await;
            (false, None)
        }
        "stop" => {
            panel.stop().await;
            (false, None)
        }
        "restart" => {
            panel.restart().await;
            (false, None)
        }
        "newnym" => {
            panel.rotate_identity().await;
            (false, None)
        }

        "bridge" => {
            if !args.is_empty() {
                panel.bridge_input().set(args.join(" "));
            }
            panel.add_bridge().await;
            (false, None)
        }

        "logs" => {
            let target = LogTarget::from(args.first().copied().unwrap_or(""));
            match panel.load_logs(&target).await {
                OperationOutcome::Applied => (false, Some(render::render_logs(panel.log_pane()))),
                _ => (false, None),
            }
        }

        "ping" => match panel.ping().await {
            Ok(_) => (
                false,
                Some(format!("Backend reachable at {}", panel.settings().api_base())),
            ),
            Err(e) => (false, Some(format!("Backend unreachable: {}", e))),
        },

        "pause" => {
            poll.pause();
            (false, Some("Status polling paused.".to_string()))
        }
        "resume" => {
            poll.resume();
            (false, Some("Status polling resumed.".to_string()))
        }

        "quit" | "exit" => (true, Some("Stopping status polling...".to_string())),

        _ => (
            false,
            Some(format!("Unknown command '{}'. Type 'help' for usage.", cmd)),
        ),
    }
}
