//! `PostgreSQL` user directory.

use sqlx::{PgPool, Row};
use swapp_core::error::{Result, SwapError};
use swapp_core::providers::UserDirectory;
use swapp_core::types::{UserId, UserProfile};

/// `PostgreSQL` user directory.
///
/// Reads `users.username` as the display name.
#[derive(Clone)]
pub struct PostgresUserDirectory {
    /// `PostgreSQL` connection pool.
    pool: PgPool,
}

impl PostgresUserDirectory {
    /// Create a new `PostgreSQL` user directory.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user (seeding, tests).
    ///
    /// # Errors
    ///
    /// Returns error if the insert fails (duplicate id or email).
    pub async fn insert(&self, profile: &UserProfile) -> Result<()> {
        sqlx::query("INSERT INTO users (id, username, email) VALUES ($1, $2, $3)")
            .bind(profile.id.0)
            .bind(&profile.display_name)
            .bind(&profile.email)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return SwapError::DatabaseError("Email already exists".to_string());
                    }
                }
                SwapError::DatabaseError(format!("Failed to create user: {e}"))
            })?;

        Ok(())
    }
}

impl UserDirectory for PostgresUserDirectory {
    async fn find_by_id(&self, id: UserId) -> Result<UserProfile> {
        let row = sqlx::query("SELECT id, username, email FROM users WHERE id = $1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| SwapError::DatabaseError(format!("Failed to get user: {e}")))?
            .ok_or(SwapError::UserNotFound(id))?;

        Ok(UserProfile {
            id: UserId(row.get("id")),
            display_name: row.get("username"),
            email: row.get("email"),
        })
    }
}
