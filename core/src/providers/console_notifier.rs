//! Console notification channel for development and testing.

use super::{Notification, Notifier};
use crate::error::Result;
use tracing::info;

/// Console notification channel.
///
/// Logs notifications and prints them to stdout instead of sending them.
///
/// # Examples
///
/// ```ignore
/// use swapp_core::providers::{ConsoleNotifier, Notification, Notifier};
///
/// let channel = ConsoleNotifier::new();
/// channel.send(&Notification {
///     recipient_email: "user@example.com".into(),
///     subject: "New Swap Request Created (reference abc)".into(),
///     body: "You have a new swap request from Ada.".into(),
/// }).await?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    /// Create a console channel that prints every message.
    #[must_use]
    pub const fn new() -> Self {
        Self { quiet: false }
    }

    /// Create a console channel that only logs (no stdout box).
    #[must_use]
    pub const fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl Notifier for ConsoleNotifier {
    async fn send(&self, notification: &Notification) -> Result<()> {
        info!(
            to = %notification.recipient_email,
            subject = %notification.subject,
            "📧 Swap notification (development mode)"
        );

        if self.quiet {
            return Ok(());
        }

        let to = &notification.recipient_email;
        let subject = &notification.subject;

        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                   SWAP NOTIFICATION                          ║");
        println!("╠══════════════════════════════════════════════════════════════╣");
        println!("║ To: {to:<57}║");
        println!("║ Subject: {subject:<52}║");
        println!("╠══════════════════════════════════════════════════════════════╣");

        // Word wrap body to fit in box
        for line in notification.body.lines() {
            let chars: Vec<char> = line.chars().collect();
            for chunk in chars.chunks(60) {
                let chunk: String = chunk.iter().collect();
                println!("║ {chunk:<61}║");
            }
        }

        println!("╚══════════════════════════════════════════════════════════════╝\n");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_notifier_always_succeeds() {
        let channel = ConsoleNotifier::quiet();
        let result = channel
            .send(&Notification {
                recipient_email: "bob@example.com".into(),
                subject: "Swap request abc has been accepted".into(),
                body: "Good news!".into(),
            })
            .await;
        assert!(result.is_ok());
    }
}
