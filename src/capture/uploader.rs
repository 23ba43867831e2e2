//! Upload seam: one multipart POST to the transcription service.

use super::AudioCapture;
use crate::feedback::FeedbackReport;
use crate::{Error, Result};
use async_trait::async_trait;

/// Capability interface for submitting a capture. The controller depends on
/// this, not on any concrete transport, so the flow is testable with a stub.
#[async_trait]
pub trait AudioUploader: Send + Sync {
    async fn upload(&self, capture: AudioCapture) -> Result<FeedbackReport>;
}

/// Uploads a capture to `/transcribe-audio` as multipart form data, field
/// `audio`, filename `audio.webm`.
pub struct HttpUploader {
    http_client: reqwest::Client,
    endpoint: String,
}

impl HttpUploader {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http_client: reqwest::Client::new(),
            endpoint: format!("{}/transcribe-audio", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl AudioUploader for HttpUploader {
    async fn upload(&self, capture: AudioCapture) -> Result<FeedbackReport> {
        let part = reqwest::multipart::Part::bytes(capture.bytes.to_vec())
            .file_name("audio.webm")
            .mime_str(&capture.content_type)
            .map_err(|e| Error::upload(format!("invalid content type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("audio", part);
        let response = self
            .http_client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::upload(format!("upload request failed: {}", e)))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::upload(format!("failed to read response: {}", e)))?;
        if !status.is_success() {
            // the service answers errors as {"error": "..."}
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            return Err(Error::upload(format!("HTTP {}: {}", status, message)));
        }
        Ok(serde_json::from_str(&body)?)
    }
}
