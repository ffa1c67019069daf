//! Terminal rendering of the status view and the log pane.

use colored::{ColoredString, Colorize};

use torpanel_core::logs::LogPane;
use torpanel_core::status::render::Field;
use torpanel_core::status::{StatusView, VisualClass};

/// How many trailing log lines `logs` prints.
pub const LOG_TAIL_LINES: usize = 200;

fn paint(field: &Field) -> ColoredString {
    match field.class {
        Some(VisualClass::Running) => field.text.as_str().green(),
        Some(VisualClass::Stopped) => field.text.as_str().red(),
        Some(VisualClass::Unknown) => field.text.as_str().yellow(),
        None => field.text.as_str().normal(),
    }
}

pub fn render_status(view: &StatusView) -> String {
    let mut out = String::new();
    out.push_str(&format!("  Tor:         {}\n", paint(&view.tor)));
    out.push_str(&format!("  Lyrebird:    {}\n", paint(&view.lyrebird)));
    out.push_str(&format!("  Current IP:  {}\n", paint(&view.current_ip)));
    out.push_str(&format!("  Bridges:     {}", paint(&view.bridges)));
    if let Some(version) = &view.tor_version {
        out.push_str(&format!("\n  Tor version: {}", version));
    }
    out
}

/// One line for background change notices.
pub fn render_status_line(view: &StatusView) -> String {
    format!(
        "[status] tor={} lyrebird={} ip={} bridges={}",
        paint(&view.tor),
        paint(&view.lyrebird),
        view.current_ip.text,
        paint(&view.bridges)
    )
}

pub fn render_logs(pane: &LogPane) -> String {
    pane.tail(LOG_TAIL_LINES)
}
