use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use voicelog::application::ports::{AudioStore, BillingOutbox, CreditLedger, RecordRepository, Transcriber};
use voicelog::application::services::{BillingWorker, TranscriptionService};
use voicelog::domain::Pricing;
use voicelog::infrastructure::inference::TranscriberFactory;
use voicelog::infrastructure::observability::{TracingConfig, init_tracing};
use voicelog::infrastructure::persistence::{
    PgBillingOutbox, PgCreditLedger, PgRecordRepository, create_pool,
};
use voicelog::infrastructure::storage::AudioStoreFactory;
use voicelog::presentation::{AppState, InferenceModeSetting, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    init_tracing(TracingConfig::default(), settings.server.port);

    if settings.inference.mode == InferenceModeSetting::Disabled {
        tracing::warn!("Running with inference disabled; transcripts will be marker text");
    }

    let pool = create_pool(&settings.database.url, settings.database.max_connections).await?;

    let records: Arc<dyn RecordRepository> = Arc::new(PgRecordRepository::new(pool.clone()));
    let ledger: Arc<dyn CreditLedger> = Arc::new(PgCreditLedger::new(pool.clone()));
    let outbox: Arc<dyn BillingOutbox> = Arc::new(PgBillingOutbox::new(pool));
    let audio_store: Arc<dyn AudioStore> = AudioStoreFactory::create(&settings.storage)?;
    let transcriber: Arc<dyn Transcriber> = TranscriberFactory::create(&settings.inference)?;

    let transcription_service = Arc::new(TranscriptionService::new(
        Arc::clone(&records),
        audio_store,
        transcriber,
        Arc::clone(&ledger),
        Arc::clone(&outbox),
        Pricing::default(),
        settings.billing.app_id.clone(),
    ));

    let billing_worker = BillingWorker::new(
        outbox,
        ledger,
        settings.billing.app_id.clone(),
        Duration::from_secs(settings.billing.poll_interval_secs),
        settings.billing.batch_size,
    );
    tokio::spawn(billing_worker.run());

    let state = AppState {
        transcription_service,
        record_repository: records,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
