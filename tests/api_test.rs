use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use uuid::Uuid;

use voicelog::application::ports::{RecordRepository, Transcriber, TranscriberError};
use voicelog::application::services::TranscriptionService;
use voicelog::domain::{
    AudioFormat, Pricing, RecordStatus, StoragePath, TokenUsage, Transcription, VoiceLog,
};
use voicelog::infrastructure::persistence::{
    MockBillingOutbox, MockCreditLedger, MockRecordRepository,
};
use voicelog::infrastructure::storage::MockAudioStore;
use voicelog::presentation::{AppState, create_router};

const TEST_TRANSCRIPT: &str = "Pacient má teplotu 37.2.";

struct MockTranscriber;

#[async_trait::async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(
        &self,
        _audio: &[u8],
        _format: AudioFormat,
    ) -> Result<Transcription, TranscriberError> {
        Ok(Transcription {
            text: TEST_TRANSCRIPT.to_string(),
            usage: TokenUsage::new(1000, 200),
        })
    }
}

struct TestApp {
    router: axum::Router,
    records: Arc<MockRecordRepository>,
    store: Arc<MockAudioStore>,
}

fn create_test_app() -> TestApp {
    let records = Arc::new(MockRecordRepository::new());
    let store = Arc::new(MockAudioStore::new());
    let ledger = Arc::new(MockCreditLedger::new());
    let outbox = Arc::new(MockBillingOutbox::new());

    let record_repository: Arc<dyn RecordRepository> = records.clone();

    let transcription_service = Arc::new(TranscriptionService::new(
        Arc::clone(&record_repository),
        Arc::clone(&store),
        Arc::new(MockTranscriber),
        ledger,
        outbox,
        Pricing::default(),
        "voicelog".to_string(),
    ));

    let state = AppState {
        transcription_service,
        record_repository,
    };

    TestApp {
        router: create_router(state),
        records,
        store,
    }
}

fn seed_record(app: &TestApp, status: RecordStatus, with_asset: bool) -> VoiceLog {
    let mut record = VoiceLog::new(Uuid::new_v4(), StoragePath::from_raw("u1/clip.wav"), 42);
    record.status = status;
    if with_asset {
        app.store.insert(&record.audio_path, vec![0u8; 5000]);
    }
    app.records.insert(record.clone());
    record
}

fn transcribe_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/transcriptions")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_running_server_when_health_check_then_returns_ok() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_pending_record_when_transcribing_then_returns_transcript_and_usage() {
    let app = create_test_app();
    let record = seed_record(&app, RecordStatus::Pending, true);

    let response = app
        .router
        .clone()
        .oneshot(transcribe_request(&format!(
            r#"{{"recordId": "{}"}}"#,
            record.id
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["transcript"], TEST_TRANSCRIPT);
    assert_eq!(body["usage"]["input"], 1000);
    assert_eq!(body["usage"]["output"], 200);
    assert_eq!(body["usage"]["cost"], 0.00324);

    let stored = app.records.get(record.id).unwrap();
    assert_eq!(stored.status, RecordStatus::Processed);
}

#[tokio::test]
async fn given_missing_record_id_when_transcribing_then_returns_bad_request() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(transcribe_request("{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_blank_record_id_when_transcribing_then_returns_bad_request() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(transcribe_request(r#"{"recordId": "  "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_malformed_record_id_when_transcribing_then_returns_bad_request() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(transcribe_request(r#"{"recordId": "not-a-uuid"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_unknown_record_when_transcribing_then_returns_not_found() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(transcribe_request(&format!(
            r#"{{"recordId": "{}"}}"#,
            Uuid::new_v4()
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_record_without_asset_when_transcribing_then_returns_not_found() {
    let app = create_test_app();
    let record = seed_record(&app, RecordStatus::Pending, false);

    let response = app
        .router
        .clone()
        .oneshot(transcribe_request(&format!(
            r#"{{"recordId": "{}"}}"#,
            record.id
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The failed run must leave the record claimable.
    let stored = app.records.get(record.id).unwrap();
    assert_eq!(stored.status, RecordStatus::Pending);
}

#[tokio::test]
async fn given_in_flight_record_when_transcribing_then_returns_conflict() {
    let app = create_test_app();
    let record = seed_record(&app, RecordStatus::Processing, true);

    let response = app
        .router
        .oneshot(transcribe_request(&format!(
            r#"{{"recordId": "{}"}}"#,
            record.id
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn given_processed_record_when_fetching_status_then_returns_full_state() {
    let app = create_test_app();
    let record = seed_record(&app, RecordStatus::Pending, true);

    // Run the workflow through the API first.
    let response = app
        .router
        .clone()
        .oneshot(transcribe_request(&format!(
            r#"{{"recordId": "{}"}}"#,
            record.id
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/voicelogs/{}", record.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "processed");
    assert_eq!(body["transcript"], TEST_TRANSCRIPT);
    assert_eq!(body["tokens_input"], 1000);
    assert_eq!(body["tokens_output"], 200);
    assert_eq!(body["cost_credits"], 0.00324);
}

#[tokio::test]
async fn given_unknown_record_when_fetching_status_then_returns_not_found() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/voicelogs/{}", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_invalid_record_id_when_fetching_status_then_returns_bad_request() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(
            Request::builder()
                .uri("/api/v1/voicelogs/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
