use std::path::Path;
use std::sync::Arc;

/// One transcribed span, timestamped relative to the audio handed to the
/// engine (chunk-local, not recording-global).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}

/// Per-invocation callback bundle handed to the engine.
///
/// The engine calls `on_segment` zero or more times, in the order it
/// produces text, and `on_progress` zero or more times with values in
/// 0..=100; no ordering is guaranteed between the two. Returning from
/// [`SpeechEngine::transcribe_chunk`] is the completion signal.
pub trait EngineSink {
    fn on_segment(&mut self, segment: Segment);
    fn on_progress(&mut self, percent: u8);
}

/// A loaded speech model, consumed as a black box: samples in, timestamped
/// text out.
pub trait SpeechEngine: Send + Sync {
    /// Transcribes one chunk of interleaved normalized samples.
    ///
    /// `Ok(Some(text))` carries the chunk's concatenated transcript.
    /// `Ok(None)` means the engine produced nothing for this chunk; the
    /// caller skips it and continues. `Err` is an invocation failure and
    /// aborts the whole run.
    fn transcribe_chunk(
        &self,
        samples: &[f32],
        language: &str,
        sink: &mut dyn EngineSink,
    ) -> crate::Result<Option<String>>;

    fn model_name(&self) -> &str;
}

/// Factory for loading engines from model files on disk.
///
/// The orchestrator depends on this abstraction, not on a concrete
/// runtime, so tests inject deterministic doubles.
pub trait EngineLoader: Send + Sync {
    fn load(&self, model_path: &Path) -> crate::Result<Arc<dyn SpeechEngine>>;
}
