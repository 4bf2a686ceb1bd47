//! Speech capability adapters for the Shikkhok tutor.
//!
//! Both directions are best-effort by contract: synthesis returns `None` on
//! any failure, transcription returns an error-flagged string instead of an
//! error. A broken speech path never breaks the answer path.

pub mod language;
pub mod synth;
pub mod transcribe;

pub use language::language_hint;
pub use synth::{AudioClip, GttsSynthesizer, SpeechSynthesizer};
pub use transcribe::{Transcriber, UnavailableTranscriber, is_error_flagged};
