//! # Swapp Core
//!
//! Swap-request lifecycle for one-for-one item exchanges between users, with
//! mutual exclusion of item offers.
//!
//! ## Features
//!
//! - **Exclusive offers**: an item is offered in at most one open request at a time
//! - **Role-based transitions**: only the recipient answers, only the sender withdraws
//! - **Pluggable collaborators**: stores, user directory and notification channel are traits
//! - **Testable**: in-memory mocks behind the `test-utils` feature
//!
//! ## Lifecycle
//!
//! ```text
//!            accept (recipient) ──► accepted   item stays reserved
//!           /
//! pending ──┼─ reject (recipient) ─► rejected   item released
//!           \
//!            cancel (sender) ─────► cancelled  item released
//! ```
//!
//! ## Example
//!
//! ```rust
//! use swapp_core::config::ServiceConfig;
//! use swapp_core::environment::SwapEnvironment;
//! use swapp_core::mocks::{MockItemStore, MockNotifier, MockSwapRequestStore, MockUserDirectory};
//! use swapp_core::service::SwapRequestService;
//! use swapp_core::types::NewSwapRequest;
//!
//! # tokio_test::block_on(async {
//! let items = MockItemStore::new();
//! let users = MockUserDirectory::new();
//! let ada = users.add_user("Ada", "ada@example.com");
//! let bob = users.add_user("Bob", "bob@example.com");
//! let bike = items.add_item(ada, "Bike");
//! let guitar = items.add_item(bob, "Guitar");
//!
//! let env = SwapEnvironment::new(
//!     items.clone(),
//!     MockSwapRequestStore::new(),
//!     users,
//!     MockNotifier::new(),
//! );
//! let service = SwapRequestService::new(env, ServiceConfig::default());
//!
//! let request = service
//!     .create(ada, NewSwapRequest {
//!         offered_item_id: bike.id,
//!         requested_item_id: guitar.id,
//!         recipient_id: bob,
//!     })
//!     .await?;
//! assert!(items.is_reserved(bike.id));
//!
//! service.update_status(bob, request.id, "rejected").await?;
//! assert!(!items.is_reserved(bike.id));
//! # Ok::<(), swapp_core::SwapError>(())
//! # }).unwrap();
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod config;
pub mod constants;
pub mod environment;
pub mod error;
pub mod notifications;
pub mod providers;
pub mod reference;
pub mod service;
pub mod types;

// Mock implementations for testing
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use config::{AppConfig, Backend, DatabaseConfig, ServiceConfig, SmtpConfig};
pub use environment::{Clock, SwapEnvironment, SystemClock};
pub use error::{ErrorKind, Result, SwapError};
pub use service::SwapRequestService;
pub use types::{
    Item, ItemId, ItemUpdate, NewSwapRequest, ReferenceNumber, SwapRequest, SwapRequestId,
    SwapStatus, UserId, UserProfile,
};
