//! Request handlers for the transcription endpoint.

use crate::feedback;
use crate::recognizer::{RecognitionConfig, Recognizer};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Shared application state. The recognizer is the only thing shared across
/// requests; everything else is per-call.
pub struct AppState {
    pub recognizer: Arc<dyn Recognizer>,
    pub config: RecognitionConfig,
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// POST /transcribe-audio
///
/// Accepts one audio payload per request (multipart field `audio`), forwards
/// it to the recognizer with the fixed decoding configuration, and answers
/// with the transcript and feedback. The collaborator is never called when no
/// file was uploaded.
pub async fn transcribe_audio(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Response {
    let request_id = Uuid::new_v4();

    let audio = match read_audio_field(&mut multipart).await {
        Ok(Some(bytes)) if !bytes.is_empty() => bytes,
        Ok(_) => {
            info!(%request_id, "rejected request without an audio file");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: crate::Error::NoAudioUploaded.to_string(),
                }),
            )
                .into_response();
        }
        Err(message) => {
            info!(%request_id, %message, "malformed multipart upload");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse { error: message }),
            )
                .into_response();
        }
    };

    info!(%request_id, bytes = audio.len(), "sending audio to recognizer");

    match state.recognizer.recognize(&audio, &state.config).await {
        Ok(result) => {
            let report = feedback::assess(&result);
            info!(
                %request_id,
                segments = result.results.len(),
                transcript_chars = report.transcription.len(),
                "transcription complete"
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => {
            error!(%request_id, error = %e, "recognition failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Could not process audio. {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// Pull the bytes of the `audio` field out of the multipart stream, skipping
/// unrelated fields.
async fn read_audio_field(
    multipart: &mut Multipart,
) -> std::result::Result<Option<Bytes>, String> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Malformed upload: {}", e))?
    {
        if field.name() == Some("audio") {
            let data = field
                .bytes()
                .await
                .map_err(|e| format!("Failed to read audio field: {}", e))?;
            return Ok(Some(data));
        }
    }
    Ok(None)
}
