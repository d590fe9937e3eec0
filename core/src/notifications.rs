//! Notification texts for swap-request events.

use crate::providers::Notification;
use crate::types::ReferenceNumber;

/// Lifecycle events that produce a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapNotice {
    /// A new request was created; sent to the recipient.
    NewRequest,
    /// The recipient accepted; sent to the sender.
    Accepted,
    /// The recipient rejected; sent to the sender.
    Rejected,
    /// The sender deleted a request; sent to the recipient.
    ///
    /// Worded as a cancellation, which is what the recipient experiences.
    Withdrawn,
}

impl SwapNotice {
    /// Subject line for this event.
    #[must_use]
    pub fn subject(self, reference: &ReferenceNumber) -> String {
        match self {
            Self::NewRequest => format!("New Swap Request Created (reference {reference})"),
            Self::Accepted => format!("Swap request with reference {reference} has been accepted"),
            Self::Rejected => format!("Swap request with reference {reference} has been rejected"),
            Self::Withdrawn => format!("Swap request with reference {reference} has been cancelled"),
        }
    }

    /// Body text. `actor_name` is the user who caused the event.
    #[must_use]
    pub fn body(self, actor_name: &str) -> String {
        match self {
            Self::NewRequest => format!("You have a new swap request from {actor_name}"),
            Self::Accepted => {
                format!("Good news! Your swap request has been accepted by {actor_name}.")
            }
            Self::Rejected => {
                format!("Sorry, your swap request has been rejected by {actor_name}.")
            }
            Self::Withdrawn => format!("The swap request from {actor_name} has been cancelled."),
        }
    }

    /// Build the full message for `recipient_email`.
    #[must_use]
    pub fn compose(
        self,
        reference: &ReferenceNumber,
        actor_name: &str,
        recipient_email: impl Into<String>,
    ) -> Notification {
        Notification {
            recipient_email: recipient_email.into(),
            subject: self.subject(reference),
            body: self.body(actor_name),
        }
    }

    /// Label used in logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewRequest => "new_request",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ReferenceNumber {
        ReferenceNumber("AbCdEfGh12345678".to_string())
    }

    #[test]
    fn test_new_request_text() {
        let message = SwapNotice::NewRequest.compose(&reference(), "Ada", "bob@example.com");
        assert_eq!(message.recipient_email, "bob@example.com");
        assert_eq!(message.subject, "New Swap Request Created (reference AbCdEfGh12345678)");
        assert_eq!(message.body, "You have a new swap request from Ada");
    }

    #[test]
    fn test_answer_texts() {
        assert_eq!(
            SwapNotice::Accepted.body("Bob"),
            "Good news! Your swap request has been accepted by Bob."
        );
        assert_eq!(
            SwapNotice::Rejected.subject(&reference()),
            "Swap request with reference AbCdEfGh12345678 has been rejected"
        );
        assert_eq!(
            SwapNotice::Rejected.body("Bob"),
            "Sorry, your swap request has been rejected by Bob."
        );
    }

    #[test]
    fn test_withdrawn_text() {
        assert_eq!(
            SwapNotice::Withdrawn.subject(&reference()),
            "Swap request with reference AbCdEfGh12345678 has been cancelled"
        );
        assert_eq!(
            SwapNotice::Withdrawn.body("Unknown User"),
            "The swap request from Unknown User has been cancelled."
        );
    }
}
