mod engine;

pub use engine::{EngineLoader, EngineSink, Segment, SpeechEngine};

#[derive(Debug, thiserror::Error)]
pub enum SttError {
    #[error("model not found: {}", .0.display())]
    ModelNotFound(std::path::PathBuf),
    #[error("model load failed: {0}")]
    LoadFailed(String),
    #[error("model invocation failed: {0}")]
    InvocationFailed(String),
}

pub type Result<T> = std::result::Result<T, SttError>;
