//! External speech capabilities
//!
//! Transcription and translation come from an OpenAI-compatible HTTP API,
//! behind the `SpeechService` trait so the ingest pipeline can be exercised
//! without the network.

mod openai;

pub use openai::OpenAiClient;

use std::path::Path;

use thiserror::Error;

/// Failures the upstream speech provider can produce
#[derive(Debug, Error)]
pub enum SpeechError {
    /// The request never completed (connect, TLS, body transfer)
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("api error ({status}): {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    /// The provider answered 2xx but the body was not the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),

    /// The scratch audio file could not be written or read
    #[error("audio chunk unavailable: {0}")]
    Io(#[from] std::io::Error),
}

/// Speech-to-text and translation provider
#[async_trait::async_trait]
pub trait SpeechService: Send + Sync {
    /// Transcribe the audio file, hinting the source language
    async fn transcribe(&self, audio_path: &Path, language: &str) -> Result<String, SpeechError>;

    /// Translate text into the target language
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, SpeechError>;
}
