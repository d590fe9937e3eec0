//! Error types for swap-request operations.

use crate::types::{ItemId, SwapRequestId, SwapStatus, UserId};
use thiserror::Error;

/// Result type alias for swap-request operations.
pub type Result<T> = std::result::Result<T, SwapError>;

/// Coarse classification of a [`SwapError`].
///
/// Callers (an HTTP layer, a CLI) map these onto their own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Item, request or user absent.
    NotFound,
    /// Item already reserved, or invalid state transition.
    Conflict,
    /// Actor is not allowed to perform the action.
    Unauthorized,
    /// Malformed input.
    Validation,
    /// Storage, notification or configuration failure.
    Internal,
}

/// Error taxonomy for the swap-request lifecycle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SwapError {
    // ═══════════════════════════════════════════════════════════
    // Not Found
    // ═══════════════════════════════════════════════════════════

    /// Item does not exist.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// Swap request does not exist (looked up by id or reference).
    #[error("Swap request not found: {0}")]
    RequestNotFound(String),

    /// User does not exist in the directory.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    // ═══════════════════════════════════════════════════════════
    // Conflict
    // ═══════════════════════════════════════════════════════════

    /// The offered item is already promised in another pending request.
    ///
    /// Retry with a different item; retrying the same item will keep failing
    /// until the other request is rejected, cancelled or deleted.
    #[error("Item {0} is already out for offer")]
    ItemAlreadyOffered(ItemId),

    /// The request is not in a state that allows the transition.
    #[error("Invalid transition: request is '{from}', cannot become '{to}'")]
    InvalidTransition {
        /// Current status.
        from: SwapStatus,
        /// Requested status.
        to: SwapStatus,
    },

    /// An accepted request is a completed exchange and cannot be deleted.
    #[error("Swap request {0} has been accepted and cannot be deleted")]
    RequestAccepted(SwapRequestId),

    // ═══════════════════════════════════════════════════════════
    // Authorization
    // ═══════════════════════════════════════════════════════════

    /// Actor is not the sender/recipient required for this action.
    #[error("Unauthorized: {reason}")]
    Unauthorized {
        /// Why the actor was rejected.
        reason: String,
    },

    // ═══════════════════════════════════════════════════════════
    // Validation
    // ═══════════════════════════════════════════════════════════

    /// Malformed input (unknown status, self-swap, ownership mismatch).
    #[error("Validation error: {0}")]
    Validation(String),

    // ═══════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A generated reference number collided with an existing one.
    #[error("Duplicate reference number: {0}")]
    DuplicateReference(String),

    /// Notification delivery failed.
    #[error("Notification delivery failed: {0}")]
    NotificationFailed(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error (should not be exposed to users).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl SwapError {
    /// Shorthand for [`SwapError::Unauthorized`].
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    /// Classify this error.
    ///
    /// # Examples
    ///
    /// ```
    /// # use swapp_core::error::{ErrorKind, SwapError};
    /// # use swapp_core::types::ItemId;
    /// let err = SwapError::ItemAlreadyOffered(ItemId::new());
    /// assert_eq!(err.kind(), ErrorKind::Conflict);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ItemNotFound(_) | Self::RequestNotFound(_) | Self::UserNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::ItemAlreadyOffered(_)
            | Self::InvalidTransition { .. }
            | Self::RequestAccepted(_) => ErrorKind::Conflict,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Validation(_) => ErrorKind::Validation,
            Self::DatabaseError(_)
            | Self::DuplicateReference(_)
            | Self::NotificationFailed(_)
            | Self::Configuration(_)
            | Self::InternalError(_) => ErrorKind::Internal,
        }
    }

    /// Returns `true` if the caller caused this error (4xx-equivalent).
    ///
    /// # Examples
    ///
    /// ```
    /// # use swapp_core::error::SwapError;
    /// assert!(SwapError::Validation("bad status".into()).is_client_error());
    /// assert!(!SwapError::DatabaseError("down".into()).is_client_error());
    /// ```
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Internal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(SwapError::ItemNotFound(ItemId::new()).kind(), ErrorKind::NotFound);
        assert_eq!(
            SwapError::RequestNotFound("abc".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            SwapError::InvalidTransition {
                from: SwapStatus::Accepted,
                to: SwapStatus::Cancelled,
            }
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            SwapError::RequestAccepted(SwapRequestId::new()).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(SwapError::unauthorized("nope").kind(), ErrorKind::Unauthorized);
        assert_eq!(
            SwapError::DuplicateReference("x".into()).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_transition_message() {
        let err = SwapError::InvalidTransition {
            from: SwapStatus::Rejected,
            to: SwapStatus::Accepted,
        };
        assert_eq!(
            err.to_string(),
            "Invalid transition: request is 'rejected', cannot become 'accepted'"
        );
    }
}
