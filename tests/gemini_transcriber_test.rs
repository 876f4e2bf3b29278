use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use voicelog::application::ports::{Transcriber, TranscriberError};
use voicelog::domain::AudioFormat;
use voicelog::infrastructure::inference::GeminiTranscriber;

async fn start_mock_gemini_server(
    upload_status: u16,
    upload_body: &'static str,
    generate_status: u16,
    generate_body: &'static str,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new()
        .route(
            "/upload/v1beta/files",
            post(move || async move {
                (
                    StatusCode::from_u16(upload_status).unwrap(),
                    [("content-type", "application/json")],
                    upload_body,
                )
                    .into_response()
            }),
        )
        .route(
            "/v1beta/models/{model_call}",
            post(move || async move {
                (
                    StatusCode::from_u16(generate_status).unwrap(),
                    [("content-type", "application/json")],
                    generate_body,
                )
                    .into_response()
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    (format!("http://{}", addr), shutdown_tx)
}

const UPLOAD_OK: &str = r#"{"file":{"name":"files/abc123","uri":"https://files.example/abc123"}}"#;

const GENERATE_OK: &str = r#"{
  "candidates": [
    { "content": { "parts": [ { "text": "Pacient má teplotu 37.2." } ] } }
  ],
  "usageMetadata": { "promptTokenCount": 1000, "candidatesTokenCount": 200 }
}"#;

#[tokio::test]
async fn given_successful_api_when_transcribing_then_text_and_usage_are_parsed() {
    let (base_url, shutdown) = start_mock_gemini_server(200, UPLOAD_OK, 200, GENERATE_OK).await;

    let engine = GeminiTranscriber::new(
        "test-key".to_string(),
        "gemini-2.0-flash".to_string(),
        Some(base_url),
    );

    let result = engine
        .transcribe(&[0u8; 5000], AudioFormat::Wav)
        .await
        .expect("transcription failed");

    assert_eq!(result.text, "Pacient má teplotu 37.2.");
    assert_eq!(result.usage.input, 1000);
    assert_eq!(result.usage.output, 200);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn given_multi_part_answer_when_transcribing_then_parts_are_concatenated() {
    const MULTI_PART: &str = r#"{
      "candidates": [
        { "content": { "parts": [ { "text": "First half. " }, { "text": "Second half." } ] } }
      ],
      "usageMetadata": { "promptTokenCount": 10, "candidatesTokenCount": 6 }
    }"#;
    let (base_url, shutdown) = start_mock_gemini_server(200, UPLOAD_OK, 200, MULTI_PART).await;

    let engine = GeminiTranscriber::new(
        "test-key".to_string(),
        "gemini-2.0-flash".to_string(),
        Some(base_url),
    );

    let result = engine
        .transcribe(b"audio", AudioFormat::Mp3)
        .await
        .expect("transcription failed");

    assert_eq!(result.text, "First half. Second half.");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn given_no_candidates_when_transcribing_then_empty_text_with_usage() {
    const NO_CANDIDATES: &str =
        r#"{ "usageMetadata": { "promptTokenCount": 900, "candidatesTokenCount": 0 } }"#;
    let (base_url, shutdown) = start_mock_gemini_server(200, UPLOAD_OK, 200, NO_CANDIDATES).await;

    let engine = GeminiTranscriber::new(
        "test-key".to_string(),
        "gemini-2.0-flash".to_string(),
        Some(base_url),
    );

    let result = engine
        .transcribe(b"silence", AudioFormat::Webm)
        .await
        .expect("transcription failed");

    assert_eq!(result.text, "");
    assert_eq!(result.usage.input, 900);
    assert_eq!(result.usage.output, 0);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn given_upload_rejection_when_transcribing_then_upload_error_with_detail() {
    let (base_url, shutdown) =
        start_mock_gemini_server(403, r#"{"error":"forbidden"}"#, 200, GENERATE_OK).await;

    let engine = GeminiTranscriber::new(
        "bad-key".to_string(),
        "gemini-2.0-flash".to_string(),
        Some(base_url),
    );

    let err = engine
        .transcribe(b"audio", AudioFormat::Wav)
        .await
        .unwrap_err();

    match err {
        TranscriberError::UploadFailed(detail) => {
            assert!(detail.contains("403"), "detail: {}", detail);
        }
        other => panic!("expected UploadFailed, got {:?}", other),
    }

    let _ = shutdown.send(());
}

#[tokio::test]
async fn given_model_rejection_when_transcribing_then_api_error_with_detail() {
    let (base_url, shutdown) =
        start_mock_gemini_server(200, UPLOAD_OK, 429, r#"{"error":"quota exhausted"}"#).await;

    let engine = GeminiTranscriber::new(
        "test-key".to_string(),
        "gemini-2.0-flash".to_string(),
        Some(base_url),
    );

    let err = engine
        .transcribe(b"audio", AudioFormat::Wav)
        .await
        .unwrap_err();

    match err {
        TranscriberError::ApiRequestFailed(detail) => {
            assert!(detail.contains("429"), "detail: {}", detail);
            assert!(detail.contains("quota exhausted"), "detail: {}", detail);
        }
        other => panic!("expected ApiRequestFailed, got {:?}", other),
    }

    let _ = shutdown.send(());
}
