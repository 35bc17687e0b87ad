//! HTTP surface for the relay
//!
//! - POST /upload-audio/ - Ingest one audio chunk
//! - GET /stream-events/:session_id - Server-sent event stream
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
