//! Re-runs the transcription workflow outside the request path.
//!
//! One parameterized workflow replaces the pile of one-off scripts this
//! grew out of: the binary wires the same adapters as the server and feeds
//! record ids through the same service, sequentially.
//!
//! Usage: `backfill <record-id> [<record-id> ...]`

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use voicelog::application::ports::{
    AudioStore, BillingOutbox, CreditLedger, RecordRepository, Transcriber,
};
use voicelog::application::services::{BillingWorker, TranscriptionService};
use voicelog::domain::{Pricing, RecordId};
use voicelog::infrastructure::inference::TranscriberFactory;
use voicelog::infrastructure::observability::{TracingConfig, init_tracing};
use voicelog::infrastructure::persistence::{
    PgBillingOutbox, PgCreditLedger, PgRecordRepository, create_pool,
};
use voicelog::infrastructure::storage::AudioStoreFactory;
use voicelog::presentation::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let record_ids: Vec<RecordId> = std::env::args()
        .skip(1)
        .map(|arg| {
            Uuid::parse_str(&arg)
                .map(RecordId::from_uuid)
                .map_err(|_| anyhow::anyhow!("invalid record id: {}", arg))
        })
        .collect::<Result<_, _>>()?;

    if record_ids.is_empty() {
        eprintln!("usage: backfill <record-id> [<record-id> ...]");
        std::process::exit(2);
    }

    let settings = Settings::from_env()?;
    init_tracing(TracingConfig::default(), settings.server.port);

    let pool = create_pool(&settings.database.url, settings.database.max_connections).await?;

    let records: Arc<dyn RecordRepository> = Arc::new(PgRecordRepository::new(pool.clone()));
    let ledger: Arc<dyn CreditLedger> = Arc::new(PgCreditLedger::new(pool.clone()));
    let outbox: Arc<dyn BillingOutbox> = Arc::new(PgBillingOutbox::new(pool));
    let audio_store: Arc<dyn AudioStore> = AudioStoreFactory::create(&settings.storage)?;
    let transcriber: Arc<dyn Transcriber> = TranscriberFactory::create(&settings.inference)?;

    let service = TranscriptionService::new(
        records,
        audio_store,
        transcriber,
        Arc::clone(&ledger),
        Arc::clone(&outbox),
        Pricing::default(),
        settings.billing.app_id.clone(),
    );

    let mut failures = 0;
    for record_id in record_ids {
        match service.process(record_id).await {
            Ok(outcome) => {
                tracing::info!(
                    record_id = %record_id,
                    tokens_input = outcome.usage.input,
                    tokens_output = outcome.usage.output,
                    cost_credits = outcome.cost_credits,
                    billing_warning = outcome.billing_warning.as_deref().unwrap_or(""),
                    "Backfill record processed"
                );
            }
            Err(e) => {
                failures += 1;
                tracing::error!(record_id = %record_id, error = %e, "Backfill record failed");
            }
        }
    }

    // Drain anything this run parked before exiting.
    let worker = BillingWorker::new(
        outbox,
        ledger,
        settings.billing.app_id,
        Duration::from_secs(settings.billing.poll_interval_secs),
        settings.billing.batch_size,
    );
    if let Err(e) = worker.drain_once().await {
        tracing::error!(error = %e, "Final billing outbox drain failed");
    }

    if failures > 0 {
        anyhow::bail!("{} record(s) failed", failures);
    }

    Ok(())
}
