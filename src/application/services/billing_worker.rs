use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{BillingOutbox, CreditLedger};

/// Background loop that retries parked credit deductions.
///
/// Each tick drains a bounded batch from the outbox; entries the ledger
/// accepts are settled, the rest just get their attempt count bumped and
/// stay for the next tick.
pub struct BillingWorker {
    outbox: Arc<dyn BillingOutbox>,
    ledger: Arc<dyn CreditLedger>,
    app_id: String,
    poll_interval: Duration,
    batch_size: usize,
}

impl BillingWorker {
    pub fn new(
        outbox: Arc<dyn BillingOutbox>,
        ledger: Arc<dyn CreditLedger>,
        app_id: String,
        poll_interval: Duration,
        batch_size: usize,
    ) -> Self {
        Self {
            outbox,
            ledger,
            app_id,
            poll_interval,
            batch_size,
        }
    }

    pub async fn run(self) {
        tracing::info!(
            poll_interval_secs = self.poll_interval.as_secs(),
            "Billing worker started"
        );
        let mut ticker = tokio::time::interval(self.poll_interval);
        loop {
            ticker.tick().await;
            if let Err(e) = self.drain_once().await {
                tracing::error!(error = %e, "Billing outbox drain failed");
            }
        }
    }

    /// One drain pass. Separated from `run` so it can be driven directly.
    pub async fn drain_once(&self) -> Result<usize, crate::application::ports::BillingOutboxError> {
        let entries = self.outbox.list_pending(self.batch_size).await?;
        if entries.is_empty() {
            return Ok(0);
        }

        tracing::debug!(entries = entries.len(), "Retrying parked deductions");

        let mut settled = 0;
        for entry in entries {
            match self
                .ledger
                .deduct(entry.user_id, entry.amount, &entry.memo, &self.app_id)
                .await
            {
                Ok(()) => {
                    self.outbox.mark_settled(entry.id).await?;
                    settled += 1;
                    tracing::info!(
                        entry_id = %entry.id,
                        record_id = %entry.record_id,
                        amount = entry.amount,
                        "Parked deduction settled"
                    );
                }
                Err(e) => {
                    self.outbox.mark_attempted(entry.id).await?;
                    tracing::warn!(
                        entry_id = %entry.id,
                        attempts = entry.attempts + 1,
                        error = %e,
                        "Parked deduction still failing"
                    );
                }
            }
        }

        Ok(settled)
    }
}
