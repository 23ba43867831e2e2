//! Confidence-to-feedback transformation.
//!
//! This is the one piece of original logic in the service: it turns the
//! recognizer's word-confidence list into a transcript plus a readable
//! feedback summary. Feedback is derived only from the first alternative of
//! the first result segment; everything degrades to a fixed advisory string
//! rather than an absent field.

use crate::recognizer::RecognitionResult;
use serde::{Deserialize, Serialize};

/// Words scored strictly below this are flagged for practice, and an average
/// below it lands in the lowest band.
pub const PRACTICE_THRESHOLD: f32 = 0.7;

/// Inclusive lower bound of the top band.
pub const EXCELLENT_THRESHOLD: f32 = 0.9;

/// Advisory when the recognizer returned no result segments at all.
pub const NO_SPEECH_FEEDBACK: &str = "No speech detected or unclear audio. Please try again.";

/// Advisory when a transcript came back without word-level confidence.
pub const NO_WORDS_FEEDBACK: &str = "No word-level confidence available. Speak more clearly.";

/// Feedback band for an average confidence score.
///
/// Bands have an inclusive lower bound and an exclusive upper bound, except
/// the top band which includes 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    NeedsImprovement,
    Good,
    Excellent,
}

impl ConfidenceBand {
    pub fn from_average(average: f32) -> Self {
        if average < PRACTICE_THRESHOLD {
            ConfidenceBand::NeedsImprovement
        } else if average < EXCELLENT_THRESHOLD {
            ConfidenceBand::Good
        } else {
            ConfidenceBand::Excellent
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            ConfidenceBand::NeedsImprovement => {
                "Overall: Your pronunciation could use some improvement. Try to enunciate more clearly."
            }
            ConfidenceBand::Good => {
                "Overall: Good job! You're doing well, but there's always room for refinement."
            }
            ConfidenceBand::Excellent => {
                "Overall: Excellent pronunciation! Keep up the great work."
            }
        }
    }
}

/// What the service returns for one upload. Computed once per request, never
/// persisted. `transcription` keeps its original wire name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub transcription: String,
    pub feedback: String,
}

/// Derive the full report from one recognition response.
pub fn assess(result: &RecognitionResult) -> FeedbackReport {
    FeedbackReport {
        transcription: joined_transcript(result),
        feedback: compose_feedback(result),
    }
}

/// Top transcript of every result segment, newline-joined. Segments without
/// alternatives contribute nothing.
fn joined_transcript(result: &RecognitionResult) -> String {
    result
        .results
        .iter()
        .filter_map(|segment| segment.alternatives.first())
        .map(|alt| alt.transcript.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn compose_feedback(result: &RecognitionResult) -> String {
    let words = match result
        .results
        .first()
        .and_then(|segment| segment.alternatives.first())
    {
        Some(alternative) => &alternative.words,
        None => return NO_SPEECH_FEEDBACK.to_string(),
    };
    if words.is_empty() {
        return NO_WORDS_FEEDBACK.to_string();
    }

    let average = words.iter().map(|w| w.confidence).sum::<f32>() / words.len() as f32;
    let band = ConfidenceBand::from_average(average);

    let mut feedback = String::new();
    feedback.push_str(band.headline());
    feedback.push_str("\n\n");
    feedback.push_str(&format!(
        "Transcription Confidence (Average): {:.2}\n\n",
        average
    ));
    feedback.push_str("Word-level Confidence:\n");
    for word in words {
        feedback.push_str(&format!("\"{}\": {:.2}", word.word, word.confidence));
        if word.confidence < PRACTICE_THRESHOLD {
            feedback.push_str(" (Needs practice!)");
        }
        feedback.push('\n');
    }
    feedback
}
