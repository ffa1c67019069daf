use torpanel_common::traits::Notifier;

use crate::i18n::Strings;
use crate::Error;

/// How a failure-isolated operation ended. Failures have already been shown
/// to the operator by the time this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationOutcome {
    /// The operation succeeded and its result was applied.
    Applied,
    /// The request succeeded but a newer refresh had already been applied.
    Superseded,
    /// Network, HTTP or decode failure.
    Failed,
    /// Local validation stopped the operation before any network call.
    Rejected,
}

impl OperationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, OperationOutcome::Applied | OperationOutcome::Superseded)
    }
}

/// Shows `err` to the operator as `<error prefix><operation prefix><error>`.
pub fn report_failure(notifier: &dyn Notifier, strings: &Strings, operation: &str, err: &Error) {
    notifier.error(&format!("{}{}{}", strings.error_prefix, operation, err));
}
