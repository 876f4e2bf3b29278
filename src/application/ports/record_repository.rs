use async_trait::async_trait;

use crate::domain::{RecordId, RecordStatus, TokenUsage, VoiceLog};

/// Result of the conditional claim write.
#[derive(Debug, Clone)]
pub enum ClaimOutcome {
    /// The claim succeeded; the returned row reflects the pre-claim fields
    /// with `status` already set to `processing`. The status the row held
    /// before the claim rides along so a failed run can restore it.
    Claimed {
        record: VoiceLog,
        previous_status: RecordStatus,
    },
    /// Another invocation holds the record.
    InFlight,
    NotFound,
}

/// Everything a completed run writes back, applied as one update.
#[derive(Debug, Clone)]
pub struct TranscriptionResult {
    pub transcript: String,
    pub status: RecordStatus,
    pub usage: TokenUsage,
    pub cost_credits: f64,
}

#[async_trait]
pub trait RecordRepository: Send + Sync {
    async fn get_by_id(&self, id: RecordId) -> Result<Option<VoiceLog>, RepositoryError>;

    /// Compare-and-swap the record into `processing` unless it is already
    /// there. Any other status is claimable so a finished record can be
    /// re-run and overwritten.
    async fn claim(&self, id: RecordId) -> Result<ClaimOutcome, RepositoryError>;

    /// Write transcript, status, token counts and cost in a single update.
    async fn store_result(
        &self,
        id: RecordId,
        result: &TranscriptionResult,
    ) -> Result<(), RepositoryError>;

    /// Revert an in-flight claim to the given status, normally the one the
    /// row held before the claim. A no-op if the record is not `processing`
    /// anymore.
    async fn release(&self, id: RecordId, status: RecordStatus) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
}
