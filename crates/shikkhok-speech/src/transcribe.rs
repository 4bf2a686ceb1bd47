//! Speech-to-text transcription.

use async_trait::async_trait;

use crate::synth::AudioClip;

/// Marker prepended to transcription failures.
///
/// Transcription never returns an error: callers get a displayable string
/// either way, and can detect the failure case with [`is_error_flagged`].
pub const ERROR_FLAG: &str = "[voice error]";

/// Best-effort speech-to-text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe a clip. On failure the result is an error-flagged string,
    /// never an `Err`.
    async fn transcribe(&self, audio: &AudioClip) -> String;
}

/// Whether a transcription result is a flagged failure.
pub fn is_error_flagged(text: &str) -> bool {
    text.starts_with(ERROR_FLAG)
}

/// Transcriber used when no recognition engine is configured.
pub struct UnavailableTranscriber;

#[async_trait]
impl Transcriber for UnavailableTranscriber {
    async fn transcribe(&self, _audio: &AudioClip) -> String {
        format!("{} speech recognition is not configured", ERROR_FLAG)
    }
}
