//! Notification channel trait.

use super::Notification;
use crate::error::Result;
use std::future::Future;

/// Notification channel.
///
/// Abstracts over delivery mechanisms (SMTP, console, a queue). The
/// orchestrator logs failures and never propagates them.
pub trait Notifier: Send + Sync {
    /// Deliver one message.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The address is invalid
    /// - The transport rejects or cannot reach the server
    fn send(&self, notification: &Notification) -> impl Future<Output = Result<()>> + Send;
}
