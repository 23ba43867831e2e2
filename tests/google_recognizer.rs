//! GoogleRecognizer against a mockito collaborator.

use base64::Engine;
use mockito::{Matcher, Server};
use speakscore::recognizer::{GoogleRecognizer, RecognitionConfig, Recognizer};

fn recognizer_for(server: &Server) -> GoogleRecognizer {
    GoogleRecognizer::builder()
        .base_url(server.url())
        .api_key("test-key")
        .build()
        .unwrap()
}

#[tokio::test]
async fn sends_fixed_config_and_base64_audio() {
    let mut server = Server::new_async().await;
    let audio = b"opus-bytes";
    let expected = serde_json::json!({
        "config": {
            "encoding": "WEBM_OPUS",
            "sampleRateHertz": 48000,
            "languageCode": "en-US",
            "enableWordConfidence": true,
            "enableAutomaticPunctuation": true,
            "model": "default"
        },
        "audio": {
            "content": base64::engine::general_purpose::STANDARD.encode(audio)
        }
    });
    let mock = server
        .mock("POST", "/v1/speech:recognize")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::Json(expected))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"results":[{"alternatives":[{"transcript":"hello world",
                "words":[{"word":"hello","confidence":0.92},{"word":"world","confidence":0.88}]}]}]}"#,
        )
        .create_async()
        .await;

    let recognizer = recognizer_for(&server);
    let result = recognizer
        .recognize(audio, &RecognitionConfig::default())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(result.results.len(), 1);
    let alternative = &result.results[0].alternatives[0];
    assert_eq!(alternative.transcript, "hello world");
    assert_eq!(alternative.words.len(), 2);
    assert_eq!(alternative.words[0].word, "hello");
}

#[tokio::test]
async fn no_speech_response_parses_to_empty_result() {
    let mut server = Server::new_async().await;
    // the API answers bare `{}` when nothing was recognized
    let _mock = server
        .mock("POST", "/v1/speech:recognize")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let recognizer = recognizer_for(&server);
    let result = recognizer
        .recognize(b"silence", &RecognitionConfig::default())
        .await
        .unwrap();
    assert!(result.results.is_empty());
}

#[tokio::test]
async fn api_error_maps_to_recognition_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/speech:recognize")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"code":400,"message":"Invalid audio encoding."}}"#)
        .create_async()
        .await;

    let recognizer = recognizer_for(&server);
    let err = recognizer
        .recognize(b"not-opus", &RecognitionConfig::default())
        .await
        .unwrap_err();

    assert!(matches!(err, speakscore::Error::Recognition { .. }));
    let message = err.to_string();
    assert!(message.contains("400"));
    assert!(message.contains("Invalid audio encoding."));
}
