//! Mock notification channel for testing.

use super::lock;
use crate::error::{Result, SwapError};
use crate::providers::{Notification, Notifier};
use std::sync::{Arc, Mutex};

/// Mock notification channel.
///
/// Records every message instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
    /// Whether to simulate delivery failure.
    pub should_fail: bool,
}

impl MockNotifier {
    /// Create a recording channel that succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a channel whose every send fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Messages delivered so far (for testing).
    #[must_use]
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Messages delivered to `email` (for testing).
    #[must_use]
    pub fn sent_to(&self, email: &str) -> Vec<Notification> {
        self.sent()
            .into_iter()
            .filter(|n| n.recipient_email == email)
            .collect()
    }
}

impl Notifier for MockNotifier {
    async fn send(&self, notification: &Notification) -> Result<()> {
        if self.should_fail {
            return Err(SwapError::NotificationFailed(
                "Simulated delivery failure".to_string(),
            ));
        }
        lock(&self.sent)?.push(notification.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> Notification {
        Notification {
            recipient_email: "bob@example.com".into(),
            subject: "s".into(),
            body: "b".into(),
        }
    }

    #[tokio::test]
    async fn test_records_messages() {
        let notifier = MockNotifier::new();
        assert!(notifier.send(&message()).await.is_ok());
        assert_eq!(notifier.sent_to("bob@example.com").len(), 1);
    }

    #[tokio::test]
    async fn test_failing_records_nothing() {
        let notifier = MockNotifier::failing();
        assert!(notifier.send(&message()).await.is_err());
        assert!(notifier.sent().is_empty());
    }
}
