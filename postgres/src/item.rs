//! `PostgreSQL` item store.
//!
//! The reservation flag lives on the `items` row. `try_reserve` is a single
//! conditional `UPDATE`, so exclusivity holds across any number of service
//! instances sharing the database.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use swapp_core::error::{Result, SwapError};
use swapp_core::providers::ItemStore;
use swapp_core::types::{Item, ItemId, ItemUpdate, UserId};
use tracing::debug;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    description: String,
    picture_url: String,
    reserved: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: ItemId(row.id),
            owner_id: UserId(row.owner_id),
            name: row.name,
            description: row.description,
            picture_url: row.picture_url,
            reserved: row.reserved,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// `PostgreSQL` item store.
#[derive(Clone)]
pub struct PostgresItemStore {
    /// `PostgreSQL` connection pool.
    pool: PgPool,
}

impl PostgresItemStore {
    /// Create a new `PostgreSQL` item store.
    ///
    /// # Arguments
    ///
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an item (seeding, tests).
    ///
    /// # Errors
    ///
    /// Returns error if the insert fails (unknown owner, duplicate id).
    pub async fn insert(&self, item: &Item) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO items
                (id, owner_id, name, description, picture_url, reserved, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(item.id.0)
        .bind(item.owner_id.0)
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.picture_url)
        .bind(item.reserved)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| SwapError::DatabaseError(format!("Failed to insert item: {e}")))?;

        Ok(())
    }
}

impl ItemStore for PostgresItemStore {
    async fn find_by_id(&self, id: ItemId) -> Result<Item> {
        let row: ItemRow = sqlx::query_as(
            r"
            SELECT id, owner_id, name, description, picture_url, reserved, created_at, updated_at
            FROM items
            WHERE id = $1
            ",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SwapError::DatabaseError(format!("Failed to get item: {e}")))?
        .ok_or(SwapError::ItemNotFound(id))?;

        Ok(row.into())
    }

    async fn try_reserve(&self, id: ItemId) -> Result<bool> {
        let result = sqlx::query(
            r"
            UPDATE items
            SET reserved = TRUE, updated_at = NOW()
            WHERE id = $1 AND reserved = FALSE
            ",
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| SwapError::DatabaseError(format!("Failed to reserve item: {e}")))?;

        let reserved = result.rows_affected() == 1;
        debug!(item_id = %id, reserved, "Reservation attempt");
        Ok(reserved)
    }

    async fn release(&self, id: ItemId) -> Result<()> {
        sqlx::query("UPDATE items SET reserved = FALSE, updated_at = NOW() WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| SwapError::DatabaseError(format!("Failed to release item: {e}")))?;

        Ok(())
    }

    async fn update_details(&self, id: ItemId, update: &ItemUpdate) -> Result<Item> {
        if update.is_empty() {
            return self.find_by_id(id).await;
        }

        let row: ItemRow = sqlx::query_as(
            r"
            UPDATE items
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                picture_url = COALESCE($4, picture_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, owner_id, name, description, picture_url, reserved, created_at, updated_at
            ",
        )
        .bind(id.0)
        .bind(update.name.as_deref())
        .bind(update.description.as_deref())
        .bind(update.picture_url.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SwapError::DatabaseError(format!("Failed to update item: {e}")))?
        .ok_or(SwapError::ItemNotFound(id))?;

        Ok(row.into())
    }
}
