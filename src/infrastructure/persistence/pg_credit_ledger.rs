use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{CreditLedger, CreditLedgerError};

/// Debits balances through the `deduct_credits` stored procedure, which
/// owns the ledger rows and the balance check.
pub struct PgCreditLedger {
    pool: PgPool,
}

impl PgCreditLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreditLedger for PgCreditLedger {
    #[instrument(skip(self, memo), fields(user_id = %user_id, amount = amount))]
    async fn deduct(
        &self,
        user_id: Uuid,
        amount: f64,
        memo: &str,
        app_id: &str,
    ) -> Result<(), CreditLedgerError> {
        sqlx::query("SELECT deduct_credits($1, $2, $3, $4)")
            .bind(user_id)
            .bind(amount)
            .bind(memo)
            .bind(app_id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) => CreditLedgerError::Rejected(db.message().to_string()),
                _ => CreditLedgerError::RpcFailed(e.to_string()),
            })?;

        Ok(())
    }
}
