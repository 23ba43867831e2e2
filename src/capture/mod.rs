//! Capture/upload client orchestration.
//!
//! The browser UI under `static/` is the thin DOM variant of this flow; this
//! module is the typed one. An explicit two-state [`CaptureSession`] replaces
//! free-floating recorder globals, and [`StatusLine`] owns its auto-clear
//! timer so a stale timer can never hide a newer message.

mod uploader;

pub use uploader::{AudioUploader, HttpUploader};

use crate::feedback::FeedbackReport;
use crate::{Error, Result};
use bytes::{Bytes, BytesMut};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// How long a resolved status message stays visible.
pub const CLEAR_DELAY: Duration = Duration::from_secs(3);

/// The two states a capture session can be in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaptureState {
    #[default]
    Idle,
    Recording,
}

/// One recorded utterance, ready for upload. Owned by the client side until
/// transmitted and discarded once the request completes.
#[derive(Debug, Clone)]
pub struct AudioCapture {
    pub bytes: Bytes,
    pub content_type: String,
}

/// Accumulates recorder chunks between `start` and `stop`.
///
/// Transitions are only Idle -> Recording on [`start`](Self::start) and
/// Recording -> Idle on [`stop`](Self::stop); `stop` returns to Idle
/// unconditionally, whatever the caller then does with the capture.
#[derive(Debug, Default)]
pub struct CaptureSession {
    state: CaptureState,
    chunks: Vec<Bytes>,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Begin a new recording, discarding chunks from any previous one.
    /// Fails without changing state if a recording is already in progress.
    pub fn start(&mut self) -> Result<()> {
        if self.state == CaptureState::Recording {
            return Err(Error::invalid_state("already recording"));
        }
        self.chunks.clear();
        self.state = CaptureState::Recording;
        Ok(())
    }

    /// Append one emitted data chunk. Chunks arriving while idle are rejected.
    pub fn push_chunk(&mut self, chunk: Bytes) -> Result<()> {
        if self.state != CaptureState::Recording {
            return Err(Error::invalid_state("chunk received while idle"));
        }
        self.chunks.push(chunk);
        Ok(())
    }

    /// End the recording and concatenate all chunks into a single capture.
    pub fn stop(&mut self) -> Result<AudioCapture> {
        if self.state != CaptureState::Recording {
            return Err(Error::invalid_state("not recording"));
        }
        self.state = CaptureState::Idle;
        let mut buf = BytesMut::with_capacity(self.chunks.iter().map(|c| c.len()).sum());
        for chunk in self.chunks.drain(..) {
            buf.extend_from_slice(&chunk);
        }
        Ok(AudioCapture {
            bytes: buf.freeze(),
            content_type: "audio/webm".to_string(),
        })
    }
}

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// Transient status indicator with a cancellable auto-clear.
///
/// Setting a new message aborts the pending clear of the previous one; a
/// resolved message clears itself after [`CLEAR_DELAY`].
///
/// [`resolve`](Self::resolve) spawns the clear timer as a tokio task, so a
/// `StatusLine` must live inside a tokio runtime; calling `resolve` outside
/// one panics.
#[derive(Debug, Default)]
pub struct StatusLine {
    current: Arc<Mutex<Option<StatusMessage>>>,
    clear_task: Option<JoinHandle<()>>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<StatusMessage> {
        self.current.lock().unwrap().clone()
    }

    /// Show a message that stays until replaced.
    pub fn set(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.cancel_pending();
        *self.current.lock().unwrap() = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    /// Show a terminal message and schedule it to clear after [`CLEAR_DELAY`].
    pub fn resolve(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.set(text, kind);
        let slot = Arc::clone(&self.current);
        self.clear_task = Some(tokio::spawn(async move {
            tokio::time::sleep(CLEAR_DELAY).await;
            *slot.lock().unwrap() = None;
        }));
    }

    fn cancel_pending(&mut self) {
        if let Some(task) = self.clear_task.take() {
            task.abort();
        }
    }
}

impl Drop for StatusLine {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

/// Drives the full record-then-upload round for one utterance.
///
/// There is no retry: a failed upload is reported once through the status
/// line and the user must start over.
pub struct CaptureController<U: AudioUploader> {
    session: CaptureSession,
    status: StatusLine,
    uploader: U,
}

impl<U: AudioUploader> CaptureController<U> {
    pub fn new(uploader: U) -> Self {
        Self {
            session: CaptureSession::new(),
            status: StatusLine::new(),
            uploader,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.session.state()
    }

    pub fn status(&self) -> Option<StatusMessage> {
        self.status.current()
    }

    /// Start recording. Call once the input stream has actually been granted;
    /// a denied microphone is reported here instead.
    pub fn start(&mut self) -> Result<()> {
        self.session.start()?;
        self.status
            .set("Recording started. Speak clearly!", StatusKind::Info);
        Ok(())
    }

    /// Surface a client-side failure (e.g. microphone permission denied)
    /// without leaving the idle state.
    pub fn report_failure(&mut self, message: impl Into<String>) {
        self.status.resolve(message, StatusKind::Error);
    }

    pub fn push_chunk(&mut self, chunk: Bytes) -> Result<()> {
        self.session.push_chunk(chunk)
    }

    /// Stop recording and upload the capture in one asynchronous request.
    /// The session is back in Idle before the upload starts, so the outcome
    /// never affects the state machine.
    pub async fn stop_and_upload(&mut self) -> Result<FeedbackReport> {
        let capture = self.session.stop()?;
        self.status.set("Processing audio...", StatusKind::Info);
        match self.uploader.upload(capture).await {
            Ok(report) => {
                self.status
                    .resolve("Transcription received!", StatusKind::Info);
                Ok(report)
            }
            Err(e) => {
                self.status
                    .resolve(format!("Error processing audio: {}", e), StatusKind::Error);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[test]
    fn session_transitions() {
        let mut session = CaptureSession::new();
        assert_eq!(session.state(), CaptureState::Idle);

        session.start().unwrap();
        assert_eq!(session.state(), CaptureState::Recording);
        assert!(session.start().is_err());
        assert_eq!(session.state(), CaptureState::Recording);

        let capture = session.stop().unwrap();
        assert_eq!(session.state(), CaptureState::Idle);
        assert!(capture.bytes.is_empty());
        assert_eq!(capture.content_type, "audio/webm");
    }

    #[test]
    fn chunks_concatenate_in_push_order() {
        let mut session = CaptureSession::new();
        session.start().unwrap();
        session.push_chunk(Bytes::from_static(b"abc")).unwrap();
        session.push_chunk(Bytes::from_static(b"def")).unwrap();
        let capture = session.stop().unwrap();
        assert_eq!(&capture.bytes[..], b"abcdef");

        // a fresh start discards the old buffer
        session.start().unwrap();
        let capture = session.stop().unwrap();
        assert!(capture.bytes.is_empty());
    }

    #[test]
    fn events_outside_recording_are_rejected() {
        let mut session = CaptureSession::new();
        assert!(session.push_chunk(Bytes::from_static(b"x")).is_err());
        assert!(session.stop().is_err());
        assert_eq!(session.state(), CaptureState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn resolved_status_clears_after_delay() {
        let mut line = StatusLine::new();
        line.resolve("Transcription received!", StatusKind::Info);
        assert!(line.current().is_some());

        tokio::time::sleep(CLEAR_DELAY + Duration::from_millis(50)).await;
        assert!(line.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn newer_message_cancels_pending_clear() {
        let mut line = StatusLine::new();
        line.resolve("Transcription received!", StatusKind::Info);
        line.set("Recording started. Speak clearly!", StatusKind::Info);

        // the stale timer from the first message must not fire
        tokio::time::sleep(CLEAR_DELAY * 2).await;
        let current = line.current().expect("newer message was cleared");
        assert_eq!(current.text, "Recording started. Speak clearly!");
    }

    struct StubUploader {
        fail: bool,
    }

    #[async_trait]
    impl AudioUploader for StubUploader {
        async fn upload(&self, capture: AudioCapture) -> crate::Result<FeedbackReport> {
            if self.fail {
                return Err(Error::upload("connection refused"));
            }
            Ok(FeedbackReport {
                transcription: format!("{} bytes", capture.bytes.len()),
                feedback: "ok".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn controller_uploads_on_stop() {
        let mut controller = CaptureController::new(StubUploader { fail: false });
        controller.start().unwrap();
        controller.push_chunk(Bytes::from_static(b"opus")).unwrap();
        let report = controller.stop_and_upload().await.unwrap();
        assert_eq!(report.transcription, "4 bytes");
        assert_eq!(controller.state(), CaptureState::Idle);
        assert_eq!(
            controller.status().unwrap().text,
            "Transcription received!"
        );
    }

    #[tokio::test]
    async fn controller_returns_to_idle_on_failed_upload() {
        let mut controller = CaptureController::new(StubUploader { fail: true });
        controller.start().unwrap();
        let err = controller.stop_and_upload().await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
        // Recording -> Idle regardless of the upload outcome
        assert_eq!(controller.state(), CaptureState::Idle);
        let status = controller.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.starts_with("Error processing audio:"));
    }
}
