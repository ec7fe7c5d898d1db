#[cfg(test)]
use mockall::automock;

/// Transient, non-blocking user notification (a toast).
#[cfg_attr(test, automock)]
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Sends toasts to the log. Used when no UI shell is attached.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        tracing::warn!(target: "toast", "{}", message);
    }
}
