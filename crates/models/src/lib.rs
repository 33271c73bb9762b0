mod download;

use std::path::{Path, PathBuf};

pub use download::download_model;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("http error: {0}")]
    Http(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("incomplete download: expected {expected} bytes, got {got}")]
    IncompleteDownload { expected: u64, got: u64 },
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// One installable speech model. `name` doubles as the on-disk file name;
/// `size_label` is a human-readable figure for download prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SpeechModel {
    pub name: &'static str,
    pub language: &'static str,
    pub size_label: &'static str,
    pub description: &'static str,
    pub url: &'static str,
}

static CATALOG: [SpeechModel; 2] = [
    SpeechModel {
        name: "ggml-base-en.bin",
        language: "en",
        size_label: "142 MB",
        description: "Multilingual model (supports 50+ languages)",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.bin",
    },
    SpeechModel {
        name: "ggml-base-hi.bin",
        language: "hi",
        size_label: "140 MB",
        description: "Hindi-optimized model",
        url: "https://huggingface.co/khidrew/whisper-base-hindi-ggml/resolve/main/ggml-base-hi.bin",
    },
];

pub fn catalog() -> &'static [SpeechModel] {
    &CATALOG
}

pub fn default_model() -> &'static SpeechModel {
    &CATALOG[0]
}

/// Picks the model for a note's transcription language. Gujarati shares the
/// Hindi-optimized model; everything else uses the multilingual default.
pub fn model_for_language(language: &str) -> &'static SpeechModel {
    match language {
        "hi" | "gu" => &CATALOG[1],
        _ => &CATALOG[0],
    }
}

pub fn models_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("voxnote")
        .join("models")
}

pub fn model_path(name: &str) -> PathBuf {
    models_dir().join(name)
}

pub fn is_downloaded(name: &str) -> bool {
    is_downloaded_in(&models_dir(), name)
}

pub fn is_downloaded_in(dir: &Path, name: &str) -> bool {
    dir.join(name).exists()
}
