//! The per-run worker loop: chunk, decode, invoke, report.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use voxnote_audio::{ChunkError, StreamingChunker};
use voxnote_stt::{EngineSink, Segment, SpeechEngine};

use crate::events::{RunError, TranscriptSegment, TranscriptionEvent};

/// Everything one run needs, owned by its worker thread.
pub(crate) struct RunContext {
    pub engine: Arc<dyn SpeechEngine>,
    pub path: PathBuf,
    pub language: String,
    pub chunk_seconds: u32,
    pub cancel: CancellationToken,
    pub events: UnboundedSender<TranscriptionEvent>,
}

/// Runs the whole file and returns the terminal event. The caller sends it
/// after the state machine has settled, so a consumer that sees the
/// terminal event already observes the post-run phase.
pub(crate) fn execute(ctx: &RunContext) -> TranscriptionEvent {
    match transcribe_file(ctx) {
        Ok(terminal) => terminal,
        Err(err) => {
            tracing::error!("transcription failed: {err}");
            TranscriptionEvent::Failed(err)
        }
    }
}

fn transcribe_file(ctx: &RunContext) -> Result<TranscriptionEvent, RunError> {
    let mut chunker = StreamingChunker::open(&ctx.path, ctx.chunk_seconds)?;

    let outcome = run_chunks(ctx, &mut chunker);
    chunker.release_buffers();
    let outcome = outcome?;

    let transcript = outcome.chunk_texts.join(" ");
    if outcome.stopped {
        tracing::info!("transcription stopped by user");
        return Ok(TranscriptionEvent::Stopped { transcript });
    }

    let _ = ctx.events.send(TranscriptionEvent::Progress(100));
    tracing::info!(chars = transcript.len(), "transcription complete");
    Ok(TranscriptionEvent::Completed { transcript })
}

struct RunOutcome {
    stopped: bool,
    chunk_texts: Vec<String>,
}

fn run_chunks(ctx: &RunContext, chunker: &mut StreamingChunker) -> Result<RunOutcome, RunError> {
    let plan = chunker.chunks();
    let total_chunks = plan.len();
    let data_offset = plan.header().data_offset;
    let bytes_per_ms = plan.header().bytes_per_second() as f64 / 1000.0;

    tracing::info!(
        path = %ctx.path.display(),
        chunks = total_chunks,
        model = ctx.engine.model_name(),
        language = %ctx.language,
        "starting transcription"
    );

    let mut reporter = ProgressReporter {
        total_chunks,
        high_water: 0,
        events: ctx.events.clone(),
    };
    let mut chunk_texts = Vec::new();
    let mut stopped = false;

    for (index, chunk) in plan.enumerate() {
        if ctx.cancel.is_cancelled() {
            tracing::info!(chunk = index, "cancellation observed, stopping");
            stopped = true;
            break;
        }

        reporter.report(index, 0);

        let samples = match chunker.read_chunk(&chunk) {
            Ok(samples) => samples,
            Err(ChunkError::Io(err)) => {
                tracing::warn!(chunk = index, "skipping unreadable chunk: {err}");
                continue;
            }
            Err(ChunkError::OutOfMemory { needed }) => {
                tracing::error!(chunk = index, needed, "chunk buffer allocation failed");
                return Err(RunError::OutOfMemory);
            }
        };

        let chunk_start_ms = ((chunk.start_offset - data_offset) as f64 / bytes_per_ms) as u64;
        let mut sink = ChunkSink {
            chunk_start_ms,
            chunk_index: index,
            reporter: &mut reporter,
        };

        match ctx.engine.transcribe_chunk(samples, &ctx.language, &mut sink) {
            Ok(Some(text)) => {
                let text = text.trim();
                if !text.is_empty() {
                    chunk_texts.push(text.to_string());
                }
            }
            Ok(None) => {
                tracing::debug!(chunk = index, "engine produced no text");
            }
            Err(err) => return Err(RunError::Model(err.to_string())),
        }
    }

    Ok(RunOutcome {
        stopped,
        chunk_texts,
    })
}

/// Publishes `Progress` through a high-water mark, so the emitted sequence
/// is non-decreasing no matter what per-chunk values the engine reports.
struct ProgressReporter {
    total_chunks: usize,
    high_water: u8,
    events: UnboundedSender<TranscriptionEvent>,
}

impl ProgressReporter {
    fn report(&mut self, completed_chunks: usize, chunk_percent: u8) {
        let overall = if self.total_chunks == 0 {
            100
        } else {
            let raw = completed_chunks * 100 / self.total_chunks
                + usize::from(chunk_percent) / self.total_chunks;
            raw.min(100) as u8
        };
        if overall > self.high_water {
            self.high_water = overall;
            let _ = self.events.send(TranscriptionEvent::Progress(overall));
        }
    }
}

/// Forwards one chunk's engine callbacks, shifting segment timestamps from
/// chunk-local to file-global.
struct ChunkSink<'a> {
    chunk_start_ms: u64,
    chunk_index: usize,
    reporter: &'a mut ProgressReporter,
}

impl EngineSink for ChunkSink<'_> {
    fn on_segment(&mut self, segment: Segment) {
        let segment = TranscriptSegment {
            start_ms: self.chunk_start_ms + segment.start_ms,
            end_ms: self.chunk_start_ms + segment.end_ms,
            text: segment.text,
        };
        let _ = self
            .reporter
            .events
            .send(TranscriptionEvent::Segment(segment));
    }

    fn on_progress(&mut self, percent: u8) {
        self.reporter.report(self.chunk_index, percent);
    }
}
