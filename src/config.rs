use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub openai: OpenAiConfig,
    pub nats: NatsConfig,
    pub relay: RelayConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Settings for the OpenAI-compatible transcription/translation API
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// Bearer credential; normally supplied via OPENAI_API_KEY
    pub api_key: String,
    pub base_url: String,
    pub transcription_model: String,
    pub translation_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NatsConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Seconds a relay waits for a message before emitting a keep-alive
    pub poll_timeout_secs: u64,
}

impl RelayConfig {
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }
}

impl Config {
    /// Load configuration from an optional TOML file
    ///
    /// Every key has an in-code default, so the service runs with no file
    /// at all. OPENAI_API_KEY and NATS_URL env vars win over file values.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "speech-relay")?
            .set_default("service.http.bind", "0.0.0.0")?
            .set_default("service.http.port", 8000i64)?
            .set_default("openai.api_key", "")?
            .set_default("openai.base_url", "https://api.openai.com/v1")?
            .set_default("openai.transcription_model", "whisper-1")?
            .set_default("openai.translation_model", "gpt-4o")?
            .set_default("nats.url", "nats://localhost:4222")?
            .set_default("relay.poll_timeout_secs", 30i64)?
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        let mut cfg: Config = settings.try_deserialize()?;

        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            cfg.openai.api_key = key;
        }
        if let Ok(url) = std::env::var("NATS_URL") {
            cfg.nats.url = url;
        }

        Ok(cfg)
    }
}
