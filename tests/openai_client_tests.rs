use std::path::Path;

use speech_relay::config::OpenAiConfig;
use speech_relay::speech::{OpenAiClient, SpeechError, SpeechService};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base_url: String) -> OpenAiConfig {
    OpenAiConfig {
        api_key: "test-key".to_string(),
        base_url,
        transcription_model: "whisper-1".to_string(),
        translation_model: "gpt-4o".to_string(),
    }
}

fn scratch_audio() -> tempfile::NamedTempFile {
    let file = tempfile::Builder::new()
        .prefix("chunk-")
        .suffix(".webm")
        .tempfile()
        .unwrap();
    std::fs::write(file.path(), b"fake webm bytes").unwrap();
    file
}

#[tokio::test]
async fn test_transcribe_decodes_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "text": "привет" })),
        )
        .mount(&server)
        .await;

    let client = OpenAiClient::new(test_config(server.uri())).unwrap();
    let audio = scratch_audio();

    let text = client.transcribe(audio.path(), "ru").await.unwrap();
    assert_eq!(text, "привет");
}

#[tokio::test]
async fn test_translate_sends_system_prompt_and_decodes_choice() {
    let server = MockServer::start().await;

    let expected_body = serde_json::json!({
        "model": "gpt-4o",
        "messages": [
            { "role": "system", "content": "Translate text to English." },
            { "role": "user", "content": "привет" }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [ { "message": { "content": "hello" } } ]
        })))
        .mount(&server)
        .await;

    let client = OpenAiClient::new(test_config(server.uri())).unwrap();

    let translated = client.translate("привет", "English").await.unwrap();
    assert_eq!(translated, "hello");
}

#[tokio::test]
async fn test_api_error_status_is_typed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": { "message": "bad key", "type": "invalid_request_error" }
        })))
        .mount(&server)
        .await;

    let client = OpenAiClient::new(test_config(server.uri())).unwrap();

    let err = client.translate("привет", "English").await.unwrap_err();
    match err {
        SpeechError::Api { status, message } => {
            assert_eq!(status.as_u16(), 401);
            assert!(message.contains("bad key"));
        }
        other => panic!("expected api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_choices_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
        )
        .mount(&server)
        .await;

    let client = OpenAiClient::new(test_config(server.uri())).unwrap();

    let err = client.translate("привет", "English").await.unwrap_err();
    assert!(matches!(err, SpeechError::Decode(_)));
}

#[tokio::test]
async fn test_missing_audio_file_is_io_error() {
    // Base URL is never reached; the read fails first
    let client = OpenAiClient::new(test_config("http://127.0.0.1:1".to_string())).unwrap();

    let err = client
        .transcribe(Path::new("/nonexistent/chunk.webm"), "ru")
        .await
        .unwrap_err();
    assert!(matches!(err, SpeechError::Io(_)));
}
