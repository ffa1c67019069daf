/// Operator-facing notification channel.
///
/// Both calls are expected to be shown prominently; `error` receives text that
/// already carries its localized prefix.
pub trait Notifier: Send + Sync {
    fn message(&self, text: &str);
    fn error(&self, text: &str);
}
