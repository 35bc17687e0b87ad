use serde::{Deserialize, Serialize};
use serde_json::json;

/// Event published on a session channel
///
/// The wire envelope is `{"event": "<kind>", "data": {...}}`, which is also
/// the shape the relay splits into SSE `event:`/`data:` lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Speech-to-text result for one uploaded chunk
    Transcribed { text: String },
    /// Translation of the transcribed text
    Translated { translated_text: String },
    /// Upstream failure, surfaced asynchronously to stream subscribers
    Error { error: String },
}

impl SessionEvent {
    pub fn error(err: impl std::fmt::Display) -> Self {
        Self::Error {
            error: err.to_string(),
        }
    }

    /// SSE event name for this event
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transcribed { .. } => "transcribed",
            Self::Translated { .. } => "translated",
            Self::Error { .. } => "error",
        }
    }

    /// The `data` half of the envelope
    pub fn data(&self) -> serde_json::Value {
        match self {
            Self::Transcribed { text } => json!({ "text": text }),
            Self::Translated { translated_text } => json!({ "translated_text": translated_text }),
            Self::Error { error } => json!({ "error": error }),
        }
    }
}
