//! Speech-recognition collaborator: the capability interface everything
//! downstream depends on, plus the HTTP client for a concrete provider.
//!
//! The feedback computation and the HTTP handlers only ever see the
//! [`Recognizer`] trait, so they can be exercised with a stub.

mod google;
mod types;

pub use google::{GoogleRecognizer, GoogleRecognizerBuilder};
pub use types::{Alternative, RecognitionConfig, RecognitionResult, SpeechResult, WordInfo};

use crate::Result;
use async_trait::async_trait;

/// Capability interface for the external recognition engine.
///
/// One call per request; no retries, no cancellation beyond whatever timeout
/// the implementation carries.
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Transcribe one audio payload with the given decoding configuration.
    async fn recognize(
        &self,
        audio: &[u8],
        config: &RecognitionConfig,
    ) -> Result<RecognitionResult>;
}
