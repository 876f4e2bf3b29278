use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{BillingOutbox, BillingOutboxError};
use crate::domain::{BillingEntry, RecordId};

pub struct PgBillingOutbox {
    pool: PgPool,
}

impl PgBillingOutbox {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_entry(row: &PgRow) -> Result<BillingEntry, BillingOutboxError> {
    let map_err = |e: sqlx::Error| BillingOutboxError::QueryFailed(e.to_string());

    Ok(BillingEntry {
        id: row.try_get("id").map_err(map_err)?,
        record_id: RecordId::from_uuid(row.try_get::<Uuid, _>("record_id").map_err(map_err)?),
        user_id: row.try_get("user_id").map_err(map_err)?,
        amount: row.try_get("amount").map_err(map_err)?,
        memo: row.try_get("memo").map_err(map_err)?,
        attempts: row.try_get("attempts").map_err(map_err)?,
        created_at: row.try_get("created_at").map_err(map_err)?,
    })
}

#[async_trait]
impl BillingOutbox for PgBillingOutbox {
    #[instrument(skip(self, entry), fields(entry_id = %entry.id, record_id = %entry.record_id))]
    async fn enqueue(&self, entry: &BillingEntry) -> Result<(), BillingOutboxError> {
        sqlx::query(
            "INSERT INTO billing_outbox (id, record_id, user_id, amount, memo, attempts, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(entry.id)
        .bind(entry.record_id.as_uuid())
        .bind(entry.user_id)
        .bind(entry.amount)
        .bind(&entry.memo)
        .bind(entry.attempts)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| BillingOutboxError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_pending(&self, limit: usize) -> Result<Vec<BillingEntry>, BillingOutboxError> {
        let rows = sqlx::query(
            "SELECT id, record_id, user_id, amount, memo, attempts, created_at \
             FROM billing_outbox WHERE settled_at IS NULL \
             ORDER BY created_at LIMIT $1",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BillingOutboxError::QueryFailed(e.to_string()))?;

        rows.iter().map(map_entry).collect()
    }

    #[instrument(skip(self))]
    async fn mark_settled(&self, id: Uuid) -> Result<(), BillingOutboxError> {
        sqlx::query("UPDATE billing_outbox SET settled_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| BillingOutboxError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_attempted(&self, id: Uuid) -> Result<(), BillingOutboxError> {
        sqlx::query("UPDATE billing_outbox SET attempts = attempts + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| BillingOutboxError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}
