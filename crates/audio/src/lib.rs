mod chunker;
mod wav;

pub use chunker::{ChunkPlan, StreamingChunk, StreamingChunker};
pub use wav::WavHeader;

/// Default wall-clock length of one chunk, in seconds.
pub const DEFAULT_CHUNK_SECONDS: u32 = 30;

/// Header-level malformation. Fatal for the file: no chunks are produced.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("i/o error reading wav header: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing RIFF magic")]
    MissingRiff,
    #[error("missing WAVE magic")]
    MissingWave,
    #[error("missing fmt chunk")]
    MissingFmt,
    #[error("malformed fmt chunk")]
    MalformedFmt,
    #[error("missing data chunk")]
    MissingData,
    #[error("unsupported encoding (format tag {0})")]
    UnsupportedEncoding(u16),
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),
    #[error("invalid channel count: {0}")]
    InvalidChannels(u16),
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(u32),
    #[error("data chunk declares {declared} bytes but only {available} are in the file")]
    TruncatedData { declared: u64, available: u64 },
}

/// Failure while reading one chunk's bytes. The run decides whether to skip
/// the chunk (`Io`) or abort (`OutOfMemory`).
#[derive(Debug, thiserror::Error)]
pub enum ChunkError {
    #[error("i/o error reading chunk: {0}")]
    Io(#[from] std::io::Error),
    #[error("scratch buffer allocation failed ({needed} bytes)")]
    OutOfMemory { needed: usize },
}
