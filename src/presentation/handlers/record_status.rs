use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::{AudioStore, Transcriber};
use crate::domain::RecordId;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct RecordStatusResponse {
    pub id: String,
    pub status: String,
    pub audio_path: String,
    pub transcript: Option<String>,
    pub tokens_input: u64,
    pub tokens_output: u64,
    pub cost_credits: f64,
    pub duration_seconds: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state))]
pub async fn record_status_handler<A, T>(
    State(state): State<AppState<A, T>>,
    Path(record_id): Path<String>,
) -> impl IntoResponse
where
    A: AudioStore + ?Sized + 'static,
    T: Transcriber + ?Sized + 'static,
{
    let uuid = match Uuid::parse_str(&record_id) {
        Ok(u) => u,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid record ID: {}", record_id),
                }),
            )
                .into_response();
        }
    };

    match state
        .record_repository
        .get_by_id(RecordId::from_uuid(uuid))
        .await
    {
        Ok(Some(record)) => {
            let response = RecordStatusResponse {
                id: record.id.to_string(),
                status: record.status.as_str().to_string(),
                audio_path: record.audio_path.to_string(),
                transcript: record.transcript,
                tokens_input: record.tokens_input,
                tokens_output: record.tokens_output,
                cost_credits: record.cost_credits,
                duration_seconds: record.duration_seconds,
                created_at: record.created_at.to_rfc3339(),
                updated_at: record.updated_at.to_rfc3339(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Record not found: {}", record_id),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch record");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch record: {}", e),
                }),
            )
                .into_response()
        }
    }
}
