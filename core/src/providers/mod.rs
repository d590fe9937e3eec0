//! Collaborator interfaces for the swap-request orchestrator.
//!
//! The orchestrator depends only on these traits; the runtime injects
//! concrete implementations:
//!
//! - **Testing**: in-memory mocks (`crate::mocks`, feature `test-utils`)
//! - **Production**: `PostgreSQL` stores (`swapp-postgres`) and the SMTP channel
//! - **Development**: the console channel, which only logs
//!
//! # Reservation contract
//!
//! ```text
//! create:  find offered ──► try_reserve ──► persist ──► notify
//!                               │              │
//!                               │ false        │ error
//!                               ▼              ▼
//!                           Conflict      release (best effort)
//! ```
//!
//! [`ItemStore::try_reserve`] must be one conditional write at the storage
//! layer. In-process locks in the orchestrator are not a substitute: several
//! instances may run against the same database.

use serde::{Deserialize, Serialize};

pub mod item;
pub mod swap_request;
pub mod user;
pub mod notifier;
pub mod console_notifier;
pub mod smtp_notifier;

pub use item::ItemStore;
pub use swap_request::SwapRequestStore;
pub use user::UserDirectory;
pub use notifier::Notifier;
pub use console_notifier::ConsoleNotifier;
pub use smtp_notifier::SmtpNotifier;

/// A one-way message for a resolved recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Destination address.
    pub recipient_email: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}
