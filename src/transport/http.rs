//! HTTP transport: axum router and handlers over a shared gateway.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;

use crate::error::GenError;
use crate::gateway::{Gateway, ImageBatchRequest, VideoRequest};

/// Error body shape: `{"detail": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

fn error_response(err: &GenError) -> Response {
    let status = if err.is_validation() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(ErrorBody { detail: err.to_string() })).into_response()
}

/// Build the API router over a shared gateway.
pub fn router(gateway: Arc<Gateway>) -> Router {
    Router::new()
        .route("/generate", post(generate))
        .route("/generate-video", post(generate_video))
        .route("/health", get(health))
        .with_state(gateway)
}

/// Bind and serve the HTTP API until shutdown.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(gateway: Arc<Gateway>, host: &str, port: u16) -> Result<(), GenError> {
    let listener = TcpListener::bind(format!("{host}:{port}")).await?;
    tracing::info!(addr = %listener.local_addr()?, "http transport listening");
    axum::serve(listener, router(gateway)).await?;
    Ok(())
}

/// `POST /generate` — one result per prompt, 200 even when items fail.
async fn generate(
    State(gateway): State<Arc<Gateway>>,
    Json(request): Json<ImageBatchRequest>,
) -> Response {
    match gateway.submit_image_batch(&request).await {
        Ok(results) => Json(results).into_response(),
        Err(e) => error_response(&e),
    }
}

/// `POST /generate-video` — all-or-nothing single result.
async fn generate_video(
    State(gateway): State<Arc<Gateway>>,
    Json(request): Json<VideoRequest>,
) -> Response {
    match gateway.submit_video(&request).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "video request failed");
            error_response(&e)
        }
    }
}

/// `GET /health` — fixed liveness payload, no backend dependency.
async fn health(State(gateway): State<Arc<Gateway>>) -> Response {
    Json(gateway.health()).into_response()
}
