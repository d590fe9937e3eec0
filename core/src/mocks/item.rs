//! Mock item store for testing.

use super::lock;
use crate::error::{Result, SwapError};
use crate::providers::ItemStore;
use crate::types::{Item, ItemId, ItemUpdate, UserId};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Mock item store.
///
/// The check-and-set in `try_reserve` runs under one mutex, so concurrent
/// callers see the same exclusivity a conditional `UPDATE` gives.
#[derive(Debug, Clone, Default)]
pub struct MockItemStore {
    items: Arc<Mutex<HashMap<ItemId, Item>>>,
    fail_release: Arc<AtomicBool>,
}

impl MockItemStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an item (for testing).
    pub fn insert(&self, item: Item) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(item.id, item);
        }
    }

    /// Create an unreserved item owned by `owner` and return it.
    pub fn add_item(&self, owner: UserId, name: impl Into<String>) -> Item {
        let now = Utc::now();
        let item = Item {
            id: ItemId::new(),
            owner_id: owner,
            name: name.into(),
            description: String::new(),
            picture_url: String::new(),
            reserved: false,
            created_at: now,
            updated_at: now,
        };
        self.insert(item.clone());
        item
    }

    /// Current snapshot of an item (for testing).
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<Item> {
        self.items.lock().ok()?.get(&id).cloned()
    }

    /// Whether an item is currently reserved (for testing).
    #[must_use]
    pub fn is_reserved(&self, id: ItemId) -> bool {
        self.get(id).is_some_and(|item| item.reserved)
    }

    /// Make every subsequent `release` fail with a database error.
    pub fn set_release_failure(&self, fail: bool) {
        self.fail_release.store(fail, Ordering::SeqCst);
    }
}

impl ItemStore for MockItemStore {
    async fn find_by_id(&self, id: ItemId) -> Result<Item> {
        lock(&self.items)?
            .get(&id)
            .cloned()
            .ok_or(SwapError::ItemNotFound(id))
    }

    async fn try_reserve(&self, id: ItemId) -> Result<bool> {
        let mut items = lock(&self.items)?;
        match items.get_mut(&id) {
            Some(item) if !item.reserved => {
                item.reserved = true;
                item.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn release(&self, id: ItemId) -> Result<()> {
        if self.fail_release.load(Ordering::SeqCst) {
            return Err(SwapError::DatabaseError(
                "Simulated release failure".to_string(),
            ));
        }

        let mut items = lock(&self.items)?;
        if let Some(item) = items.get_mut(&id) {
            item.reserved = false;
            item.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn update_details(&self, id: ItemId, update: &ItemUpdate) -> Result<Item> {
        let mut items = lock(&self.items)?;
        let item = items.get_mut(&id).ok_or(SwapError::ItemNotFound(id))?;
        if !update.is_empty() {
            update.apply_to(item);
            item.updated_at = Utc::now();
        }
        Ok(item.clone())
    }
}
