//! Upload ingest pipeline
//!
//! One uploaded chunk flows through transcription and then translation,
//! with each intermediate result published to the session channel. A
//! failure at any step collapses into a single `error` event on the same
//! channel; the HTTP response to the uploader never reflects it.

use bytes::Bytes;
use tempfile::NamedTempFile;
use tracing::{error, info};
use uuid::Uuid;

use crate::bus::{EventBus, SessionEvent};
use crate::speech::{SpeechError, SpeechService};

/// One uploaded audio chunk with its routing parameters
#[derive(Debug, Clone)]
pub struct ChunkUpload {
    pub session_id: String,
    pub from_lang: String,
    pub to_lang: String,
    pub audio: Bytes,
}

/// Run one chunk through transcription and translation
///
/// Event order on the session channel is `transcribed` then `translated`,
/// or a single `error` replacing whichever step failed first.
pub async fn process_chunk(speech: &dyn SpeechService, bus: &dyn EventBus, upload: ChunkUpload) {
    let upload_id = Uuid::new_v4();

    info!(
        "Processing chunk for session {} (upload {}, {} bytes, {} -> {})",
        upload.session_id,
        upload_id,
        upload.audio.len(),
        upload.from_lang,
        upload.to_lang
    );

    if let Err(err) = run_pipeline(speech, bus, &upload).await {
        error!("Upload {} failed: {}", upload_id, err);
        publish(bus, &upload.session_id, &SessionEvent::error(err)).await;
    }
}

async fn run_pipeline(
    speech: &dyn SpeechService,
    bus: &dyn EventBus,
    upload: &ChunkUpload,
) -> Result<(), SpeechError> {
    // Scratch file lives for this call only; removed on every exit path
    // when it drops
    let scratch = write_scratch(&upload.audio).await?;

    let text = speech.transcribe(scratch.path(), &upload.from_lang).await?;
    publish(
        bus,
        &upload.session_id,
        &SessionEvent::Transcribed { text: text.clone() },
    )
    .await;

    let translated_text = speech.translate(&text, &upload.to_lang).await?;
    publish(
        bus,
        &upload.session_id,
        &SessionEvent::Translated { translated_text },
    )
    .await;

    Ok(())
}

/// Write the chunk to a uniquely named temporary file
///
/// Concurrent uploads each get their own path, so they cannot corrupt one
/// another's audio.
async fn write_scratch(audio: &[u8]) -> Result<NamedTempFile, std::io::Error> {
    let scratch = tempfile::Builder::new()
        .prefix("chunk-")
        .suffix(".webm")
        .tempfile()?;

    tokio::fs::write(scratch.path(), audio).await?;

    Ok(scratch)
}

/// Publish, logging instead of failing the pipeline on bus errors
async fn publish(bus: &dyn EventBus, session_id: &str, event: &SessionEvent) {
    if let Err(err) = bus.publish(session_id, event).await {
        error!(
            "Failed to publish {} event for session {}: {}",
            event.kind(),
            session_id,
            err
        );
    }
}
