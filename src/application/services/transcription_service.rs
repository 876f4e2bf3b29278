use std::sync::Arc;

use crate::application::ports::{
    AudioStore, AudioStoreError, BillingOutbox, ClaimOutcome, CreditLedger, RecordRepository,
    RepositoryError, Transcriber, TranscriberError, TranscriptionResult,
};
use crate::domain::{
    AudioFormat, BillingEntry, Pricing, RecordId, RecordStatus, TokenUsage, VoiceLog,
    normalize_transcript,
};

/// What one successful run reports back to the caller.
#[derive(Debug, Clone)]
pub struct TranscriptionOutcome {
    pub transcript: String,
    pub usage: TokenUsage,
    pub cost_credits: f64,
    /// Set when the inline credit deduction failed. The transcript is
    /// already committed at that point; the deduction is parked in the
    /// billing outbox and the run still counts as a success.
    pub billing_warning: Option<String>,
}

/// Drives the whole workflow for one record per invocation.
///
/// Steps are strictly sequential and each external call is attempted exactly
/// once; re-invocation on failure is the caller's job and is idempotent at
/// the row level. A record is claimed (`status -> processing`) before any
/// external call, so duplicate concurrent invocations for the same record
/// are rejected instead of double-billing.
pub struct TranscriptionService<A: ?Sized, T: ?Sized>
where
    A: AudioStore,
    T: Transcriber,
{
    records: Arc<dyn RecordRepository>,
    audio_store: Arc<A>,
    transcriber: Arc<T>,
    ledger: Arc<dyn CreditLedger>,
    outbox: Arc<dyn BillingOutbox>,
    pricing: Pricing,
    app_id: String,
}

impl<A: ?Sized, T: ?Sized> TranscriptionService<A, T>
where
    A: AudioStore,
    T: Transcriber,
{
    pub fn new(
        records: Arc<dyn RecordRepository>,
        audio_store: Arc<A>,
        transcriber: Arc<T>,
        ledger: Arc<dyn CreditLedger>,
        outbox: Arc<dyn BillingOutbox>,
        pricing: Pricing,
        app_id: String,
    ) -> Self {
        Self {
            records,
            audio_store,
            transcriber,
            ledger,
            outbox,
            pricing,
            app_id,
        }
    }

    #[tracing::instrument(skip(self), fields(record_id = %record_id))]
    pub async fn process(
        &self,
        record_id: RecordId,
    ) -> Result<TranscriptionOutcome, TranscriptionError> {
        let (record, previous_status) = match self.records.claim(record_id).await? {
            ClaimOutcome::Claimed {
                record,
                previous_status,
            } => (record, previous_status),
            ClaimOutcome::InFlight => {
                tracing::warn!("Record already being processed");
                return Err(TranscriptionError::InFlight(record_id));
            }
            ClaimOutcome::NotFound => {
                return Err(TranscriptionError::RecordNotFound(record_id));
            }
        };

        tracing::debug!(audio_path = %record.audio_path, "Record claimed");

        let audio = match self.audio_store.fetch(&record.audio_path).await {
            Ok(bytes) => bytes,
            Err(AudioStoreError::NotFound(detail)) => {
                self.release(record_id, previous_status).await;
                return Err(TranscriptionError::AssetNotFound(detail));
            }
            Err(e) => {
                self.release(record_id, previous_status).await;
                return Err(TranscriptionError::Storage(e));
            }
        };

        let format = AudioFormat::from_path(record.audio_path.as_str());
        tracing::debug!(
            bytes = audio.len(),
            mime_type = format.mime_type(),
            "Asset downloaded"
        );

        let transcription = match self.transcriber.transcribe(&audio, format).await {
            Ok(t) => t,
            Err(e) => {
                // The record must read exactly as it did before the
                // invocation, so the claim is reverted to the status it
                // held, not failed.
                self.release(record_id, previous_status).await;
                return Err(TranscriptionError::Inference(e));
            }
        };

        let transcript = normalize_transcript(&transcription.text);
        let cost = self.pricing.cost(transcription.usage);

        tracing::info!(
            tokens_input = transcription.usage.input,
            tokens_output = transcription.usage.output,
            cost_credits = cost,
            "Transcription completed"
        );

        let result = TranscriptionResult {
            transcript: transcript.clone(),
            status: RecordStatus::Processed,
            usage: transcription.usage,
            cost_credits: cost,
        };

        if let Err(e) = self.records.store_result(record_id, &result).await {
            self.release(record_id, previous_status).await;
            return Err(TranscriptionError::Persistence(e));
        }

        let billing_warning = self.deduct(&record, cost).await;

        Ok(TranscriptionOutcome {
            transcript,
            usage: transcription.usage,
            cost_credits: cost,
            billing_warning,
        })
    }

    /// Best-effort deduction. The transcript is already committed, so a
    /// ledger failure is downgraded to a warning and parked in the outbox;
    /// an occasional under-billed run beats losing a computed transcript.
    async fn deduct(&self, record: &VoiceLog, cost: f64) -> Option<String> {
        if cost <= 0.0 {
            return None;
        }

        let memo = format!("Audio transcription ({}s)", record.duration_seconds);

        match self
            .ledger
            .deduct(record.user_id, cost, &memo, &self.app_id)
            .await
        {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    user_id = %record.user_id,
                    cost_credits = cost,
                    "Credit deduction failed, parking in billing outbox"
                );
                let entry = BillingEntry::new(record.id, record.user_id, cost, memo);
                if let Err(enqueue_err) = self.outbox.enqueue(&entry).await {
                    tracing::error!(
                        error = %enqueue_err,
                        entry_id = %entry.id,
                        "Failed to enqueue billing outbox entry"
                    );
                }
                Some(format!("credit deduction failed: {}", e))
            }
        }
    }

    async fn release(&self, record_id: RecordId, status: RecordStatus) {
        if let Err(e) = self.records.release(record_id, status).await {
            tracing::error!(error = %e, status = %status, "Failed to release claim");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("record not found: {0}")]
    RecordNotFound(RecordId),
    #[error("audio asset not found: {0}")]
    AssetNotFound(String),
    #[error("record is already being processed: {0}")]
    InFlight(RecordId),
    #[error("asset download failed: {0}")]
    Storage(AudioStoreError),
    #[error("inference failed: {0}")]
    Inference(TranscriberError),
    #[error("failed to persist transcription result: {0}")]
    Persistence(RepositoryError),
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
