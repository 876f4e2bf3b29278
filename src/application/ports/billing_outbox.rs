use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::BillingEntry;

/// Parking lot for deductions the ledger refused. Entries stay until a
/// retry settles them, so metering is reconciled later instead of lost.
#[async_trait]
pub trait BillingOutbox: Send + Sync {
    async fn enqueue(&self, entry: &BillingEntry) -> Result<(), BillingOutboxError>;

    async fn list_pending(&self, limit: usize) -> Result<Vec<BillingEntry>, BillingOutboxError>;

    async fn mark_settled(&self, id: Uuid) -> Result<(), BillingOutboxError>;

    async fn mark_attempted(&self, id: Uuid) -> Result<(), BillingOutboxError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BillingOutboxError {
    #[error("query failed: {0}")]
    QueryFailed(String),
}
