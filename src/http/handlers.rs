use axum::{
    body::{Body, Bytes},
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::state::AppState;
use crate::ingest::{self, ChunkUpload};
use crate::relay;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    /// Routing key for the session's event channel
    pub session_id: Option<String>,

    /// Source language hint for transcription
    #[serde(default = "default_from_lang")]
    pub from_lang: String,

    /// Target language for translation
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
}

fn default_from_lang() -> String {
    "ru".to_string()
}

fn default_to_lang() -> String {
    "English".to_string()
}

#[derive(Debug, Serialize)]
pub struct UploadAck {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /upload-audio/
/// Accept one audio chunk and run it through the ingest pipeline
///
/// The acknowledgment only means the chunk was accepted; pipeline failures
/// surface as `error` events on the session channel, not here.
pub async fn upload_audio(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> impl IntoResponse {
    let session_id = match params.session_id.filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => {
            // No channel to publish to, so the uploader is the one party
            // we can tell
            return Json(ErrorResponse {
                error: "Invalid session".to_string(),
            })
            .into_response();
        }
    };

    let upload = ChunkUpload {
        session_id,
        from_lang: params.from_lang,
        to_lang: params.to_lang,
        audio: body,
    };

    ingest::process_chunk(state.speech.as_ref(), state.bus.as_ref(), upload).await;

    Json(UploadAck {
        status: "ok".to_string(),
    })
    .into_response()
}

/// GET /stream-events/:session_id
/// Stream the session's events as server-sent events
///
/// Subscribes before the first byte is written, then runs until the client
/// disconnects.
pub async fn stream_events(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    info!("Opening event stream for session {}", session_id);

    let events = match state.bus.subscribe(&session_id).await {
        Ok(events) => events,
        Err(err) => {
            error!("Failed to subscribe to session {}: {}", session_id, err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to subscribe: {}", err),
                }),
            )
                .into_response();
        }
    };

    let frames = relay::session_frames(events, state.relay.poll_timeout())
        .map(|frame| Ok::<_, std::convert::Infallible>(frame.to_wire()));

    Response::builder()
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(frames))
        .unwrap_or_else(|err| {
            error!("Failed to build stream response: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
