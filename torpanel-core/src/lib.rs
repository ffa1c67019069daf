// src/lib.rs

pub mod auth;
pub mod commands;
pub mod config;
pub mod http;
pub mod i18n;
pub mod logs;
pub mod outcome;
pub mod panel;
pub mod status;
pub mod tasks;
pub mod test_utils;

pub use torpanel_common::error::Error;
pub use http::{ApiClient, HttpTransport, ReqwestTransport};
pub use outcome::OperationOutcome;
pub use panel::ControlPanel;
