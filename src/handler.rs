//! Collaborator interfaces.
//!
//! The transport calls out to two pieces of code it does not own:
//!
//! | Trait | Called when |
//! |-------|-------------|
//! | [`ChatHandler`] | A `"message"` frame arrives |
//! | [`Notifier`] | No transport could be constructed |
//!
//! Both are implemented for plain closures.

// ============================================================================
// Imports
// ============================================================================

use tracing::error;

// ============================================================================
// ChatHandler
// ============================================================================

/// Receives chat messages routed from the server.
pub trait ChatHandler: Send + Sync {
    /// Called once per inbound chat message.
    fn receive_chat_message(&self, name: &str, text: &str);
}

impl<F> ChatHandler for F
where
    F: Fn(&str, &str) + Send + Sync,
{
    #[inline]
    fn receive_chat_message(&self, name: &str, text: &str) {
        self(name, text);
    }
}

// ============================================================================
// Notifier
// ============================================================================

/// User-facing notification surface.
///
/// Only used for fatal failures the user must act on.
pub trait Notifier: Send + Sync {
    /// Shows a blocking notification to the user.
    fn alert(&self, message: &str);
}

impl<F> Notifier for F
where
    F: Fn(&str) + Send + Sync,
{
    #[inline]
    fn alert(&self, message: &str) {
        self(message);
    }
}

/// Notifier that reports through `tracing` at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        error!(alert = %message, "User notification");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use parking_lot::Mutex;

    #[test]
    fn test_closure_chat_handler() {
        let received = Mutex::new(Vec::new());
        let handler = |name: &str, text: &str| {
            received.lock().push((name.to_string(), text.to_string()));
        };

        handler.receive_chat_message("Bob", "yo");

        assert_eq!(*received.lock(), vec![("Bob".to_string(), "yo".to_string())]);
    }

    #[test]
    fn test_closure_notifier() {
        let alerts = Mutex::new(Vec::new());
        let notifier = |message: &str| alerts.lock().push(message.to_string());

        notifier.alert("no transport");

        assert_eq!(*alerts.lock(), vec!["no transport".to_string()]);
    }

    #[test]
    fn test_log_notifier_does_not_panic() {
        LogNotifier.alert("no transport");
    }
}
