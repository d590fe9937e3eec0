//! `PostgreSQL` stores for swapp.
//!
//! Implements the `swapp-core` store traits on top of sqlx:
//!
//! - [`PostgresItemStore`]: items and the reservation flag
//! - [`PostgresSwapRequestStore`]: swap requests
//! - [`PostgresUserDirectory`]: user names and addresses
//!
//! The schema lives in `migrations/` and is applied with [`migrate`].
//!
//! # Example
//!
//! ```no_run
//! use swapp_core::config::DatabaseConfig;
//! use swapp_postgres::{connect, migrate, PostgresStores};
//!
//! # async fn example() -> swapp_core::Result<()> {
//! let pool = connect(&DatabaseConfig::from_env()?).await?;
//! migrate(&pool).await?;
//! let stores = PostgresStores::from_pool(pool);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod item;
pub mod swap_request;
pub mod user;

pub use item::PostgresItemStore;
pub use swap_request::PostgresSwapRequestStore;
pub use user::PostgresUserDirectory;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use swapp_core::config::DatabaseConfig;
use swapp_core::error::{Result, SwapError};
use tracing::info;

/// Open a connection pool.
///
/// # Errors
///
/// Returns [`SwapError::DatabaseError`] if the database is unreachable.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .connect(&config.url)
        .await
        .map_err(|e| SwapError::DatabaseError(format!("Failed to connect: {e}")))?;

    info!(
        max_connections = config.max_connections,
        "Connected to PostgreSQL"
    );
    Ok(pool)
}

/// Run database migrations.
///
/// # Errors
///
/// Returns error if migrations fail.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| SwapError::DatabaseError(format!("Migration failed: {e}")))?;
    Ok(())
}

/// All three stores over one pool.
#[derive(Clone)]
pub struct PostgresStores {
    /// Item store.
    pub items: PostgresItemStore,
    /// Swap request store.
    pub requests: PostgresSwapRequestStore,
    /// User directory.
    pub users: PostgresUserDirectory,
}

impl PostgresStores {
    /// Build the stores from an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            items: PostgresItemStore::new(pool.clone()),
            requests: PostgresSwapRequestStore::new(pool.clone()),
            users: PostgresUserDirectory::new(pool),
        }
    }
}
