use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{AudioStore, Transcriber};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{health_handler, record_status_handler, transcribe_handler};
use crate::presentation::state::AppState;

pub fn create_router<A, T>(state: AppState<A, T>) -> Router
where
    A: AudioStore + ?Sized + 'static,
    T: Transcriber + ?Sized + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/transcriptions", post(transcribe_handler::<A, T>))
        .route(
            "/api/v1/voicelogs/{record_id}",
            get(record_status_handler::<A, T>),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
