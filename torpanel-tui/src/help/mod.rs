//! Help text for the panel's commands.

fn show_general_help() -> String {
    let text = r#"Tor proxy control panel - Available Commands:

  status
    Show the last known service status.

  refresh
    Poll the backend now (status + combined logs).

  start | stop | restart
    Start, stop or restart the relay and its transport helper.

  newnym
    Request a new egress identity.

  bridge <bridge line...>
    Add a bridge line to the relay configuration.

  logs [all|tor|lyrebird|<service>]
    Fetch and show logs (default: all).

  ping
    Check the backend is reachable with the current credentials.

  pause | resume
    Suspend or resume the periodic status poll.

  help [command]
    Show this help, or details for one command.

  quit
    Stop polling and exit.
"#;
    text.to_string()
}

/// General help for an empty argument, otherwise the command's own text.
pub fn show_command_help(command: &str) -> String {
    match command {
        "" => show_general_help(),
        "bridge" => r#"Bridge Command
==============

Usage:
  bridge <bridge line...>

The whole rest of the line is sent as one bridge entry, trimmed.
With no argument the last rejected line is submitted again.
On success the status refreshes after a short delay.

Example:
  bridge obfs4 192.0.2.3:443 0123456789ABCDEF cert=... iat-mode=0
"#
        .to_string(),
        "logs" => r#"Logs Command
============

Usage:
  logs [all|<service>]

'all' (the default) shows one section per service.
A named service shows only that service's recent output.
"#
        .to_string(),
        "start" | "stop" | "restart" | "newnym" => format!(
            "Usage: {}\nSends the command to the backend; the status refreshes after a short delay.\n",
            command
        ),
        "pause" | "resume" => {
            "Usage: pause | resume\nControls the periodic status poll only; commands still work.\n"
                .to_string()
        }
        other => format!("No detailed help for '{}'.\n\n{}", other, show_general_help()),
    }
}
