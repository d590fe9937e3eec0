//! Swap request store trait.

use crate::error::Result;
use crate::types::{ReferenceNumber, SwapRequest, SwapRequestId, SwapStatus, UserId};
use std::future::Future;

/// Swap request store.
///
/// Durable record of swap requests, keyed by id and by reference number.
pub trait SwapRequestStore: Send + Sync {
    /// Persist a new request.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Database write fails
    /// - Reference number already exists → `SwapError::DuplicateReference`
    fn create(&self, request: &SwapRequest) -> impl Future<Output = Result<()>> + Send;

    /// Get request by ID.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Database query fails
    /// - Request not found → `SwapError::RequestNotFound`
    fn find_by_id(&self, id: SwapRequestId) -> impl Future<Output = Result<SwapRequest>> + Send;

    /// Get request by reference number.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Database query fails
    /// - Request not found → `SwapError::RequestNotFound`
    fn find_by_reference(
        &self,
        reference: &ReferenceNumber,
    ) -> impl Future<Output = Result<SwapRequest>> + Send;

    /// All requests where `user` is sender or recipient, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if database query fails.
    fn list_by_user(&self, user: UserId) -> impl Future<Output = Result<Vec<SwapRequest>>> + Send;

    /// All requests in `status`, newest first.
    ///
    /// Not filtered by participant; the orchestrator applies that filter.
    ///
    /// # Errors
    ///
    /// Returns error if database query fails.
    fn list_by_status(
        &self,
        status: SwapStatus,
    ) -> impl Future<Output = Result<Vec<SwapRequest>>> + Send;

    /// Conditionally move a request from `expected` to `status`.
    ///
    /// # Returns
    ///
    /// `true` if the row was in `expected` and is now in `status`; `false` if
    /// it was missing or in any other status.
    ///
    /// # Errors
    ///
    /// Returns error if database write fails.
    fn update_status(
        &self,
        id: SwapRequestId,
        expected: SwapStatus,
        status: SwapStatus,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// Delete a request.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Database write fails
    /// - Request not found → `SwapError::RequestNotFound`
    fn delete(&self, id: SwapRequestId) -> impl Future<Output = Result<()>> + Send;
}
