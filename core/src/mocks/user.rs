//! Mock user directory for testing.

use super::lock;
use crate::error::{Result, SwapError};
use crate::providers::UserDirectory;
use crate::types::{UserId, UserProfile};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock user directory.
#[derive(Debug, Clone, Default)]
pub struct MockUserDirectory {
    users: Arc<Mutex<HashMap<UserId, UserProfile>>>,
}

impl MockUserDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user and return the new id.
    pub fn add_user(&self, display_name: impl Into<String>, email: impl Into<String>) -> UserId {
        let profile = UserProfile {
            id: UserId::new(),
            display_name: display_name.into(),
            email: email.into(),
        };
        let id = profile.id;
        self.insert(profile);
        id
    }

    /// Insert or replace a profile.
    pub fn insert(&self, profile: UserProfile) {
        if let Ok(mut users) = self.users.lock() {
            users.insert(profile.id, profile);
        }
    }
}

impl UserDirectory for MockUserDirectory {
    async fn find_by_id(&self, id: UserId) -> Result<UserProfile> {
        lock(&self.users)?
            .get(&id)
            .cloned()
            .ok_or(SwapError::UserNotFound(id))
    }
}
