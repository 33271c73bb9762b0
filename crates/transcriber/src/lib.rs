//! Batch transcription orchestrator.
//!
//! A [`Transcriber`] owns one loaded speech engine and runs one file at a
//! time: the WAV payload streams through a fixed-size chunker, each chunk is
//! handed to the engine on a dedicated worker thread, and everything the run
//! produces comes back on a single event channel. Stopping is cooperative
//! and takes effect between chunks; the in-flight chunk always finishes and
//! its segments are kept.

mod events;
mod run;
mod transcriber;

pub use events::{RunError, TranscriptSegment, TranscriptionEvent};
pub use transcriber::{Phase, Transcriber};

/// Rejections returned synchronously by [`Transcriber`] calls, as opposed to
/// [`RunError`]s, which surface asynchronously on the event channel.
#[derive(Debug, thiserror::Error)]
pub enum TranscribeError {
    #[error("no model loaded")]
    ModelNotLoaded,
    #[error("a transcription is already running")]
    Busy,
    #[error("model load failed: {0}")]
    ModelLoad(String),
}

pub type Result<T> = std::result::Result<T, TranscribeError>;
