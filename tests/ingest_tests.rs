use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use futures::StreamExt;
use speech_relay::bus::{EventBus, EventStream, MemoryBus, SessionEvent};
use speech_relay::ingest::{process_chunk, ChunkUpload};
use speech_relay::speech::{SpeechError, SpeechService};

/// Canned speech provider; Err values become `SpeechError::Decode`
struct StubSpeech {
    transcription: Result<String, String>,
    translation: Result<String, String>,
}

impl StubSpeech {
    fn ok(transcription: &str, translation: &str) -> Self {
        Self {
            transcription: Ok(transcription.to_string()),
            translation: Ok(translation.to_string()),
        }
    }

    fn transcription_fails(message: &str) -> Self {
        Self {
            transcription: Err(message.to_string()),
            translation: Ok(String::new()),
        }
    }

    fn translation_fails(transcription: &str, message: &str) -> Self {
        Self {
            transcription: Ok(transcription.to_string()),
            translation: Err(message.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl SpeechService for StubSpeech {
    async fn transcribe(&self, _audio_path: &Path, _language: &str) -> Result<String, SpeechError> {
        self.transcription.clone().map_err(SpeechError::Decode)
    }

    async fn translate(&self, _text: &str, _target_lang: &str) -> Result<String, SpeechError> {
        self.translation.clone().map_err(SpeechError::Decode)
    }
}

fn upload(session_id: &str) -> ChunkUpload {
    ChunkUpload {
        session_id: session_id.to_string(),
        from_lang: "ru".to_string(),
        to_lang: "English".to_string(),
        audio: Bytes::from_static(b"webm bytes"),
    }
}

async fn next_event(events: &mut EventStream) -> SessionEvent {
    let payload = tokio::time::timeout(Duration::from_secs(1), events.next())
        .await
        .expect("timed out waiting for event")
        .expect("channel closed");

    serde_json::from_slice(&payload).expect("payload was not a session event")
}

async fn assert_no_more(events: &mut EventStream) {
    let result = tokio::time::timeout(Duration::from_millis(50), events.next()).await;
    assert!(result.is_err(), "expected no further events");
}

#[tokio::test]
async fn test_success_publishes_transcribed_then_translated() {
    let bus = MemoryBus::new();
    let mut events = bus.subscribe("s1").await.unwrap();

    let speech = StubSpeech::ok("привет", "hello");
    process_chunk(&speech, &bus, upload("s1")).await;

    assert_eq!(
        next_event(&mut events).await,
        SessionEvent::Transcribed {
            text: "привет".to_string()
        }
    );
    assert_eq!(
        next_event(&mut events).await,
        SessionEvent::Translated {
            translated_text: "hello".to_string()
        }
    );
    assert_no_more(&mut events).await;
}

#[tokio::test]
async fn test_transcription_failure_publishes_single_error() {
    let bus = MemoryBus::new();
    let mut events = bus.subscribe("s2").await.unwrap();

    let speech = StubSpeech::transcription_fails("quota exceeded");
    process_chunk(&speech, &bus, upload("s2")).await;

    match next_event(&mut events).await {
        SessionEvent::Error { error } => assert!(error.contains("quota exceeded")),
        other => panic!("expected error event, got {:?}", other),
    }
    // No translated event follows a failed transcription
    assert_no_more(&mut events).await;
}

#[tokio::test]
async fn test_translation_failure_follows_transcribed() {
    let bus = MemoryBus::new();
    let mut events = bus.subscribe("s3").await.unwrap();

    let speech = StubSpeech::translation_fails("привет", "model overloaded");
    process_chunk(&speech, &bus, upload("s3")).await;

    assert_eq!(
        next_event(&mut events).await,
        SessionEvent::Transcribed {
            text: "привет".to_string()
        }
    );
    match next_event(&mut events).await {
        SessionEvent::Error { error } => assert!(error.contains("model overloaded")),
        other => panic!("expected error event, got {:?}", other),
    }
    assert_no_more(&mut events).await;
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let bus = MemoryBus::new();
    let mut other = bus.subscribe("other").await.unwrap();

    let speech = StubSpeech::ok("привет", "hello");
    process_chunk(&speech, &bus, upload("s4")).await;

    // Nothing leaks onto a different session's channel
    assert_no_more(&mut other).await;
}
