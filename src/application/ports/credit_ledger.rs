use async_trait::async_trait;
use uuid::Uuid;

/// Remote stored-procedure contract for debiting a user's balance.
#[async_trait]
pub trait CreditLedger: Send + Sync {
    async fn deduct(
        &self,
        user_id: Uuid,
        amount: f64,
        memo: &str,
        app_id: &str,
    ) -> Result<(), CreditLedgerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CreditLedgerError {
    #[error("deduction rejected: {0}")]
    Rejected(String),
    #[error("rpc failed: {0}")]
    RpcFailed(String),
}
