use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::RecordId;

/// Durable outbox row for a credit deduction that could not be applied
/// inline. The billing worker retries these until the ledger accepts them.
#[derive(Debug, Clone)]
pub struct BillingEntry {
    pub id: Uuid,
    pub record_id: RecordId,
    pub user_id: Uuid,
    pub amount: f64,
    pub memo: String,
    pub attempts: i32,
    pub created_at: DateTime<Utc>,
}

impl BillingEntry {
    pub fn new(record_id: RecordId, user_id: Uuid, amount: f64, memo: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            record_id,
            user_id,
            amount,
            memo,
            attempts: 0,
            created_at: Utc::now(),
        }
    }
}
