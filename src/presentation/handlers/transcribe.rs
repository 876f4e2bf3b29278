use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::{AudioStore, Transcriber};
use crate::application::services::TranscriptionError;
use crate::domain::RecordId;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct TranscribeRequest {
    #[serde(rename = "recordId", default)]
    pub record_id: Option<String>,
}

#[derive(Serialize)]
pub struct UsageBody {
    pub input: u64,
    pub output: u64,
    pub cost: f64,
}

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub success: bool,
    pub transcript: String,
    pub usage: UsageBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_warning: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

fn error_response(
    status: StatusCode,
    error: impl Into<String>,
    details: Option<String>,
) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            details,
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state, request))]
pub async fn transcribe_handler<A, T>(
    State(state): State<AppState<A, T>>,
    Json(request): Json<TranscribeRequest>,
) -> impl IntoResponse
where
    A: AudioStore + ?Sized + 'static,
    T: Transcriber + ?Sized + 'static,
{
    let raw_id = match request.record_id.as_deref() {
        Some(id) if !id.trim().is_empty() => id.trim(),
        _ => {
            tracing::warn!("Transcription request without recordId");
            return error_response(StatusCode::BAD_REQUEST, "recordId is required", None);
        }
    };

    let record_id = match Uuid::parse_str(raw_id) {
        Ok(uuid) => RecordId::from_uuid(uuid),
        Err(_) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid recordId: {}", raw_id),
                None,
            );
        }
    };

    match state.transcription_service.process(record_id).await {
        Ok(outcome) => {
            tracing::info!(
                record_id = %record_id,
                cost_credits = outcome.cost_credits,
                "Transcription request completed"
            );
            (
                StatusCode::OK,
                Json(TranscribeResponse {
                    success: true,
                    transcript: outcome.transcript,
                    usage: UsageBody {
                        input: outcome.usage.input,
                        output: outcome.usage.output,
                        cost: outcome.cost_credits,
                    },
                    billing_warning: outcome.billing_warning,
                }),
            )
                .into_response()
        }
        Err(TranscriptionError::RecordNotFound(id)) => error_response(
            StatusCode::NOT_FOUND,
            format!("Record not found: {}", id),
            None,
        ),
        Err(TranscriptionError::AssetNotFound(detail)) => error_response(
            StatusCode::NOT_FOUND,
            "Audio asset not found",
            Some(detail),
        ),
        Err(TranscriptionError::InFlight(id)) => error_response(
            StatusCode::CONFLICT,
            format!("Record is already being processed: {}", id),
            None,
        ),
        Err(TranscriptionError::Inference(e)) => {
            tracing::error!(error = %e, "Inference call failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Transcription failed",
                Some(e.to_string()),
            )
        }
        Err(TranscriptionError::Storage(e)) => {
            tracing::error!(error = %e, "Asset download failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to download audio asset",
                Some(e.to_string()),
            )
        }
        Err(TranscriptionError::Persistence(e)) => {
            tracing::error!(error = %e, "Result write failed after inference");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to persist transcription result",
                Some(e.to_string()),
            )
        }
        Err(TranscriptionError::Repository(e)) => {
            tracing::error!(error = %e, "Repository error");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error",
                Some(e.to_string()),
            )
        }
    }
}
