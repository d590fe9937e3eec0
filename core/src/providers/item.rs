//! Item store trait.

use crate::error::Result;
use crate::types::{Item, ItemId, ItemUpdate};
use std::future::Future;

/// Item store.
///
/// Owns the physical `reserved` flag of each item.
pub trait ItemStore: Send + Sync {
    /// Get item by ID.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Database query fails
    /// - Item not found → `SwapError::ItemNotFound`
    fn find_by_id(&self, id: ItemId) -> impl Future<Output = Result<Item>> + Send;

    /// Atomically flip `reserved` from `false` to `true`.
    ///
    /// # Returns
    ///
    /// `true` if this call took the reservation, `false` if the item was
    /// already reserved (or does not exist).
    ///
    /// # Errors
    ///
    /// Returns error if the database write fails.
    fn try_reserve(&self, id: ItemId) -> impl Future<Output = Result<bool>> + Send;

    /// Set `reserved = false`. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns error if the database write fails.
    fn release(&self, id: ItemId) -> impl Future<Output = Result<()>> + Send;

    /// Update descriptive fields; never touches the reservation.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Database query fails
    /// - Item not found → `SwapError::ItemNotFound`
    fn update_details(
        &self,
        id: ItemId,
        update: &ItemUpdate,
    ) -> impl Future<Output = Result<Item>> + Send;
}
