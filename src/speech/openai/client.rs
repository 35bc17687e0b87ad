use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::messages::{
    ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
    TranscriptionResponse,
};
use crate::config::OpenAiConfig;
use crate::speech::{SpeechError, SpeechService};

/// Client for an OpenAI-compatible transcription/translation API
///
/// The reqwest client is reused across requests for connection pooling.
pub struct OpenAiClient {
    http: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, SpeechError> {
        let http = Client::builder().build()?;

        Ok(Self { http, config })
    }

    /// Decode the provider's error envelope, falling back to the raw body
    fn api_error(status: StatusCode, body: &str) -> SpeechError {
        let message = match serde_json::from_str::<ApiErrorResponse>(body) {
            Ok(envelope) => format!("{} ({})", envelope.error.message, envelope.error.error_type),
            Err(_) => body.to_string(),
        };

        SpeechError::Api { status, message }
    }
}

#[async_trait::async_trait]
impl SpeechService for OpenAiClient {
    async fn transcribe(&self, audio_path: &Path, language: &str) -> Result<String, SpeechError> {
        let audio = tokio::fs::read(audio_path).await?;

        let file_part = Part::bytes(audio)
            .file_name("chunk.webm")
            .mime_str("audio/webm")?;

        let form = Form::new()
            .part("file", file_part)
            .text("model", self.config.transcription_model.clone())
            .text("language", language.to_string());

        let response = self
            .http
            .post(format!("{}/audio/transcriptions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status, &body));
        }

        let transcription: TranscriptionResponse = serde_json::from_str(&body)
            .map_err(|e| SpeechError::Decode(format!("transcription body: {}", e)))?;

        debug!("Transcribed {} chars", transcription.text.len());

        Ok(transcription.text)
    }

    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, SpeechError> {
        let request = ChatCompletionRequest {
            model: self.config.translation_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: format!("Translate text to {}.", target_lang),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status, &body));
        }

        let completion: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| SpeechError::Decode(format!("completion body: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| SpeechError::Decode("completion had no choices".to_string()))
    }
}
