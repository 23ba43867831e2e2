//! Recognition wire types.

use serde::{Deserialize, Serialize};

/// Decoding configuration sent with every request, serialized camelCase for
/// the collaborator's JSON API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionConfig {
    pub encoding: String,
    pub sample_rate_hertz: u32,
    pub language_code: String,
    pub enable_word_confidence: bool,
    pub enable_automatic_punctuation: bool,
    pub model: String,
}

impl Default for RecognitionConfig {
    /// The fixed configuration the service uses: browser WebM/Opus capture at
    /// 48 kHz, US English, word confidence and punctuation on.
    fn default() -> Self {
        Self {
            encoding: "WEBM_OPUS".to_string(),
            sample_rate_hertz: 48_000,
            language_code: "en-US".to_string(),
            enable_word_confidence: true,
            enable_automatic_punctuation: true,
            model: "default".to_string(),
        }
    }
}

/// Full recognition response: ordered result segments.
///
/// The collaborator omits `results` entirely when no speech was detected, so
/// every collection here defaults to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecognitionResult {
    #[serde(default)]
    pub results: Vec<SpeechResult>,
}

/// One result segment with its candidate transcriptions, best first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechResult {
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
}

/// A candidate transcription with its scored words.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alternative {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub words: Vec<WordInfo>,
}

/// A transcribed word with the recognizer's confidence in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordInfo {
    pub word: String,
    #[serde(default)]
    pub confidence: f32,
}

impl WordInfo {
    pub fn new(word: impl Into<String>, confidence: f32) -> Self {
        Self {
            word: word.into(),
            confidence,
        }
    }
}
