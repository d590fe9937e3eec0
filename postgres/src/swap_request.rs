//! `PostgreSQL` swap request store.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use swapp_core::error::{Result, SwapError};
use swapp_core::providers::SwapRequestStore;
use swapp_core::types::{
    ItemId, ReferenceNumber, SwapRequest, SwapRequestId, SwapStatus, UserId,
};
use uuid::Uuid;

/// Unique constraint on `swap_requests.reference_number`.
const REFERENCE_CONSTRAINT: &str = "swap_requests_reference_number_key";

/// Partial unique index: one open request per offered item.
const OPEN_OFFER_INDEX: &str = "swap_requests_open_offer_idx";

const COLUMNS: &str = "id, reference_number, status, offered_item_id, requested_item_id, \
                       sender_id, recipient_id, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct SwapRequestRow {
    id: Uuid,
    reference_number: String,
    status: String,
    offered_item_id: Uuid,
    requested_item_id: Uuid,
    sender_id: Uuid,
    recipient_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SwapRequestRow> for SwapRequest {
    type Error = SwapError;

    fn try_from(row: SwapRequestRow) -> Result<Self> {
        let status = row.status.parse::<SwapStatus>().map_err(|_| {
            SwapError::DatabaseError(format!(
                "Unknown status '{}' on swap request {}",
                row.status, row.id
            ))
        })?;

        Ok(Self {
            id: SwapRequestId(row.id),
            reference_number: ReferenceNumber(row.reference_number),
            status,
            offered_item_id: ItemId(row.offered_item_id),
            requested_item_id: ItemId(row.requested_item_id),
            sender_id: UserId(row.sender_id),
            recipient_id: UserId(row.recipient_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_requests(rows: Vec<SwapRequestRow>) -> Result<Vec<SwapRequest>> {
    rows.into_iter().map(SwapRequest::try_from).collect()
}

/// `PostgreSQL` swap request store.
#[derive(Clone)]
pub struct PostgresSwapRequestStore {
    /// `PostgreSQL` connection pool.
    pool: PgPool,
}

impl PostgresSwapRequestStore {
    /// Create a new `PostgreSQL` swap request store.
    ///
    /// # Arguments
    ///
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(
        &self,
        clause: &str,
        key: Lookup<'_>,
    ) -> Result<Option<SwapRequest>> {
        let sql = format!("SELECT {COLUMNS} FROM swap_requests WHERE {clause}");
        let query = sqlx::query_as::<_, SwapRequestRow>(&sql);
        let query = match key {
            Lookup::Id(id) => query.bind(id),
            Lookup::Reference(reference) => query.bind(reference),
        };

        query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| SwapError::DatabaseError(format!("Failed to get swap request: {e}")))?
            .map(SwapRequest::try_from)
            .transpose()
    }
}

/// Key for a single-row lookup.
enum Lookup<'a> {
    Id(Uuid),
    Reference(&'a str),
}

impl SwapRequestStore for PostgresSwapRequestStore {
    async fn create(&self, request: &SwapRequest) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO swap_requests
                (id, reference_number, status, offered_item_id, requested_item_id,
                 sender_id, recipient_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(request.id.0)
        .bind(request.reference_number.as_str())
        .bind(request.status.as_str())
        .bind(request.offered_item_id.0)
        .bind(request.requested_item_id.0)
        .bind(request.sender_id.0)
        .bind(request.recipient_id.0)
        .bind(request.created_at)
        .bind(request.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    match db_err.constraint() {
                        Some(REFERENCE_CONSTRAINT) => {
                            return SwapError::DuplicateReference(
                                request.reference_number.to_string(),
                            );
                        }
                        Some(OPEN_OFFER_INDEX) => {
                            return SwapError::ItemAlreadyOffered(request.offered_item_id);
                        }
                        _ => {}
                    }
                }
            }
            SwapError::DatabaseError(format!("Failed to create swap request: {e}"))
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: SwapRequestId) -> Result<SwapRequest> {
        self.fetch_one_where("id = $1", Lookup::Id(id.0))
            .await?
            .ok_or_else(|| SwapError::RequestNotFound(id.to_string()))
    }

    async fn find_by_reference(&self, reference: &ReferenceNumber) -> Result<SwapRequest> {
        self.fetch_one_where("reference_number = $1", Lookup::Reference(reference.as_str()))
            .await?
            .ok_or_else(|| SwapError::RequestNotFound(reference.to_string()))
    }

    async fn list_by_user(&self, user: UserId) -> Result<Vec<SwapRequest>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM swap_requests \
             WHERE sender_id = $1 OR recipient_id = $1 \
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, SwapRequestRow>(&sql)
            .bind(user.0)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SwapError::DatabaseError(format!("Failed to list swap requests: {e}")))?;

        into_requests(rows)
    }

    async fn list_by_status(&self, status: SwapStatus) -> Result<Vec<SwapRequest>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM swap_requests WHERE status = $1 ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, SwapRequestRow>(&sql)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SwapError::DatabaseError(format!("Failed to list swap requests: {e}")))?;

        into_requests(rows)
    }

    async fn update_status(
        &self,
        id: SwapRequestId,
        expected: SwapStatus,
        status: SwapStatus,
    ) -> Result<bool> {
        let result = sqlx::query(
            r"
            UPDATE swap_requests
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            ",
        )
        .bind(id.0)
        .bind(expected.as_str())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| SwapError::DatabaseError(format!("Failed to update swap request: {e}")))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: SwapRequestId) -> Result<()> {
        let result = sqlx::query("DELETE FROM swap_requests WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| SwapError::DatabaseError(format!("Failed to delete swap request: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(SwapError::RequestNotFound(id.to_string()));
        }

        Ok(())
    }
}
