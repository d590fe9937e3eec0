//! Mock provider implementations for testing.
//!
//! Simple in-memory implementations of every provider trait, for unit and
//! integration tests and for running the orchestrator without a database.

use crate::error::{Result, SwapError};
use std::sync::{Mutex, MutexGuard};

pub mod item;
pub mod notifier;
pub mod swap_request;
pub mod user;

pub use item::MockItemStore;
pub use notifier::MockNotifier;
pub use swap_request::MockSwapRequestStore;
pub use user::MockUserDirectory;

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| SwapError::InternalError("Mock store lock poisoned".to_string()))
}
