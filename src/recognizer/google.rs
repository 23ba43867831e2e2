//! HTTP client for the Google Speech-to-Text REST API.

use super::types::{RecognitionConfig, RecognitionResult};
use super::Recognizer;
use crate::{Error, Result};
use async_trait::async_trait;
use base64::Engine;
use serde::Serialize;

/// Client for the `speech:recognize` endpoint.
///
/// Audio travels base64-encoded inside the JSON body, exactly as the REST API
/// expects; there is no streaming and no retry.
pub struct GoogleRecognizer {
    http_client: reqwest::Client,
    base_url: String,
    endpoint_path: String,
    api_key: String,
}

#[derive(Serialize)]
struct RecognizeRequest<'a> {
    config: &'a RecognitionConfig,
    audio: AudioContent,
}

#[derive(Serialize)]
struct AudioContent {
    content: String,
}

impl GoogleRecognizer {
    pub fn builder() -> GoogleRecognizerBuilder {
        GoogleRecognizerBuilder::new()
    }
}

#[async_trait]
impl Recognizer for GoogleRecognizer {
    async fn recognize(
        &self,
        audio: &[u8],
        config: &RecognitionConfig,
    ) -> Result<RecognitionResult> {
        let endpoint = format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint_path
        );
        let body = RecognizeRequest {
            config,
            audio: AudioContent {
                content: base64::engine::general_purpose::STANDARD.encode(audio),
            },
        };
        tracing::debug!(endpoint = %endpoint, bytes = audio.len(), "sending audio to recognizer");
        let response = self
            .http_client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::recognition(format!("recognize request failed: {}", e)))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| {
            Error::recognition(format!("failed to read recognizer response: {}", e))
        })?;
        if !status.is_success() {
            return Err(Error::recognition(format!(
                "recognizer API error ({}): {}",
                status, text
            )));
        }
        let result: RecognitionResult = serde_json::from_str(&text)?;
        Ok(result)
    }
}

pub struct GoogleRecognizerBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    endpoint_path: Option<String>,
    timeout_secs: u64,
}

impl GoogleRecognizerBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            endpoint_path: None,
            timeout_secs: 60,
        }
    }
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
    pub fn endpoint_path(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = Some(path.into());
        self
    }
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<GoogleRecognizer> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var("SPEAKSCORE_API_KEY").ok())
            .ok_or_else(|| Error::configuration("API key required"))?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| "https://speech.googleapis.com".to_string());
        let endpoint_path = self
            .endpoint_path
            .unwrap_or_else(|| "/v1/speech:recognize".to_string());
        let endpoint_path = if endpoint_path.starts_with('/') {
            endpoint_path
        } else {
            format!("/{}", endpoint_path)
        };
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(GoogleRecognizer {
            http_client,
            base_url,
            endpoint_path,
            api_key,
        })
    }
}

impl Default for GoogleRecognizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
