use thiserror::Error;

/// Unified error type for the service.
///
/// Every failure is terminal for its request: there are no retries anywhere,
/// the caller reports the error once and the user starts over.
#[derive(Debug, Error)]
pub enum Error {
    /// The multipart request carried no usable `audio` field.
    #[error("No audio file uploaded.")]
    NoAudioUploaded,

    /// The recognition collaborator failed or rejected the request.
    #[error("recognition service error: {message}")]
    Recognition { message: String },

    /// The upload to the transcription service failed.
    #[error("upload failed: {message}")]
    Upload { message: String },

    /// A capture-session event arrived in the wrong state.
    #[error("invalid capture state: {message}")]
    InvalidState { message: String },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new recognition error
    pub fn recognition(msg: impl Into<String>) -> Self {
        Error::Recognition {
            message: msg.into(),
        }
    }

    /// Create a new upload error
    pub fn upload(msg: impl Into<String>) -> Self {
        Error::Upload {
            message: msg.into(),
        }
    }

    /// Create a new invalid-state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Error::InvalidState {
            message: msg.into(),
        }
    }

    /// Create a new configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }
}
