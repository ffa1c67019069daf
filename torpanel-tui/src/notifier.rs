use colored::Colorize;

use torpanel_common::traits::Notifier;

/// Prints notifications inline with the command output.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for TerminalNotifier {
    fn message(&self, text: &str) {
        println!("{} {}", "»".cyan().bold(), text);
    }

    fn error(&self, text: &str) {
        println!("{} {}", "!".red().bold(), text.red());
    }
}
