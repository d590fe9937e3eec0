//! User directory trait.

use crate::error::Result;
use crate::types::{UserId, UserProfile};
use std::future::Future;

/// Read-only view of registered users, used to address notifications.
pub trait UserDirectory: Send + Sync {
    /// Resolve a user.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Database query fails
    /// - User not found → `SwapError::UserNotFound`
    fn find_by_id(&self, id: UserId) -> impl Future<Output = Result<UserProfile>> + Send;
}
