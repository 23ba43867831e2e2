//! # speakscore
//!
//! A small pronunciation-practice service. A capture client records speech into
//! a single binary blob and uploads it; the server forwards the audio to an
//! external speech-recognition collaborator and turns the returned per-word
//! confidence scores into a transcript plus human-readable feedback.
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`recognizer`] | Capability interface for the recognition collaborator and its HTTP client |
//! | [`feedback`] | Confidence-to-feedback transformation (the core computation) |
//! | [`server`] | HTTP surface: `/transcribe-audio` endpoint and static UI serving |
//! | [`capture`] | Capture/upload client orchestration (record, upload, status line) |
//! | [`config`] | Environment-driven configuration |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use speakscore::config::ServerConfig;
//! use speakscore::recognizer::GoogleRecognizer;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> speakscore::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let recognizer = GoogleRecognizer::builder()
//!         .api_key("your-api-key")
//!         .build()?;
//!     speakscore::server::serve(&config, Arc::new(recognizer)).await
//! }
//! ```

pub mod capture;
pub mod config;
pub mod feedback;
pub mod recognizer;
pub mod server;

mod error;

// Re-export main types for convenience
pub use error::Error;
pub use feedback::{ConfidenceBand, FeedbackReport};
pub use recognizer::{RecognitionConfig, RecognitionResult, Recognizer};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
