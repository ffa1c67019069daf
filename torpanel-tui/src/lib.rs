pub mod commands;
pub mod help;
pub mod input;
pub mod notifier;
pub mod render;

pub use commands::dispatch;
pub use input::{InputLines, StdinPrompt};
pub use notifier::TerminalNotifier;
