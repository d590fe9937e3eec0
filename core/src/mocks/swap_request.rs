//! Mock swap request store for testing.

use super::lock;
use crate::error::{Result, SwapError};
use crate::providers::SwapRequestStore;
use crate::types::{ReferenceNumber, SwapRequest, SwapRequestId, SwapStatus, UserId};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Mock swap request store.
#[derive(Debug, Clone, Default)]
pub struct MockSwapRequestStore {
    requests: Arc<Mutex<HashMap<SwapRequestId, SwapRequest>>>,
    fail_next_create: Arc<Mutex<Option<SwapError>>>,
    fail_next_update: Arc<AtomicBool>,
    fail_next_delete: Arc<AtomicBool>,
}

impl MockSwapRequestStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `create` fail with a database error.
    pub fn fail_next_create(&self) {
        self.fail_next_create_with(SwapError::DatabaseError(
            "Simulated insert failure".to_string(),
        ));
    }

    /// Make the next `create` fail with `error`.
    pub fn fail_next_create_with(&self, error: SwapError) {
        if let Ok(mut next) = self.fail_next_create.lock() {
            *next = Some(error);
        }
    }

    /// Make the next `update_status` fail with a database error.
    pub fn fail_next_update(&self) {
        self.fail_next_update.store(true, Ordering::SeqCst);
    }

    /// Make the next `delete` fail with a database error.
    pub fn fail_next_delete(&self) {
        self.fail_next_delete.store(true, Ordering::SeqCst);
    }

    /// All stored requests (for testing).
    #[must_use]
    pub fn all(&self) -> Vec<SwapRequest> {
        self.requests
            .lock()
            .map(|requests| requests.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of stored requests (for testing).
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    /// Whether the store is empty (for testing).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn collect_sorted<F>(&self, filter: F) -> Result<Vec<SwapRequest>>
    where
        F: Fn(&SwapRequest) -> bool,
    {
        let requests = lock(&self.requests)?;
        let mut matching: Vec<SwapRequest> =
            requests.values().filter(|r| filter(r)).cloned().collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }
}

impl SwapRequestStore for MockSwapRequestStore {
    async fn create(&self, request: &SwapRequest) -> Result<()> {
        if let Some(error) = lock(&self.fail_next_create)?.take() {
            return Err(error);
        }

        let mut requests = lock(&self.requests)?;
        if requests
            .values()
            .any(|r| r.reference_number == request.reference_number)
        {
            return Err(SwapError::DuplicateReference(
                request.reference_number.to_string(),
            ));
        }
        requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: SwapRequestId) -> Result<SwapRequest> {
        lock(&self.requests)?
            .get(&id)
            .cloned()
            .ok_or_else(|| SwapError::RequestNotFound(id.to_string()))
    }

    async fn find_by_reference(&self, reference: &ReferenceNumber) -> Result<SwapRequest> {
        lock(&self.requests)?
            .values()
            .find(|r| &r.reference_number == reference)
            .cloned()
            .ok_or_else(|| SwapError::RequestNotFound(reference.to_string()))
    }

    async fn list_by_user(&self, user: UserId) -> Result<Vec<SwapRequest>> {
        self.collect_sorted(|r| r.involves(user))
    }

    async fn list_by_status(&self, status: SwapStatus) -> Result<Vec<SwapRequest>> {
        self.collect_sorted(|r| r.status == status)
    }

    async fn update_status(
        &self,
        id: SwapRequestId,
        expected: SwapStatus,
        status: SwapStatus,
    ) -> Result<bool> {
        if self.fail_next_update.swap(false, Ordering::SeqCst) {
            return Err(SwapError::DatabaseError(
                "Simulated update failure".to_string(),
            ));
        }

        let mut requests = lock(&self.requests)?;
        match requests.get_mut(&id) {
            Some(request) if request.status == expected => {
                request.status = status;
                request.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: SwapRequestId) -> Result<()> {
        if self.fail_next_delete.swap(false, Ordering::SeqCst) {
            return Err(SwapError::DatabaseError(
                "Simulated delete failure".to_string(),
            ));
        }

        lock(&self.requests)?
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| SwapError::RequestNotFound(id.to_string()))
    }
}
