//! Notification sink for alerts raised by the editor.

use std::sync::Mutex;

use crate::error::PolicyError;
use crate::messages;

/// Severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertVariant {
    /// Operation succeeded.
    Success,
    /// Informational.
    Info,
    /// Something needs attention.
    Warning,
    /// Operation failed.
    Danger,
}

/// Receives user-facing notifications.
pub trait Notifier: Send + Sync {
    /// Shows a message with a severity. `message` is a message key.
    fn add_alert(&self, message: &str, variant: AlertVariant);

    /// Shows a failure for `key`, with the underlying error.
    fn add_error(&self, key: &str, error: &PolicyError);
}

/// Notifier that writes alerts to the tracing framework.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn add_alert(&self, message: &str, variant: AlertVariant) {
        tracing::info!(key = message, ?variant, "{}", messages::text(message));
    }

    fn add_error(&self, key: &str, error: &PolicyError) {
        tracing::warn!(key, error = %error, "{}", messages::text(key));
    }
}

/// A notification captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// An alert.
    Alert {
        /// Message key.
        message: String,
        /// Severity.
        variant: AlertVariant,
    },
    /// An error.
    Error {
        /// Message key.
        key: String,
        /// Rendered error.
        error: String,
    },
}

/// Notifier that keeps every notification, for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().map(|seen| seen.clone()).unwrap_or_default()
    }

    /// Message keys of the alerts received so far.
    #[must_use]
    pub fn alert_keys(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Alert { message, .. } => Some(message),
                Notification::Error { .. } => None,
            })
            .collect()
    }

    /// Keys of the errors received so far.
    #[must_use]
    pub fn error_keys(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Error { key, .. } => Some(key),
                Notification::Alert { .. } => None,
            })
            .collect()
    }

    fn push(&self, notification: Notification) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(notification);
        }
    }
}

impl Notifier for RecordingNotifier {
    fn add_alert(&self, message: &str, variant: AlertVariant) {
        self.push(Notification::Alert {
            message: message.to_string(),
            variant,
        });
    }

    fn add_error(&self, key: &str, error: &PolicyError) {
        self.push(Notification::Error {
            key: key.to_string(),
            error: error.to_string(),
        });
    }
}
