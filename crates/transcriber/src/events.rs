use voxnote_audio::FormatError;

/// One recognized span with timestamps global to the file, not to the chunk
/// the engine saw.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TranscriptSegment {
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}

/// Why a run died. Cheap to clone into the terminal event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize)]
pub enum RunError {
    #[error("malformed audio file: {0}")]
    Format(String),
    #[error("out of memory while buffering audio")]
    OutOfMemory,
    #[error("model invocation failed: {0}")]
    Model(String),
}

impl From<FormatError> for RunError {
    fn from(err: FormatError) -> Self {
        Self::Format(err.to_string())
    }
}

/// Everything a run reports, in order, on one channel.
///
/// `Progress` values are non-decreasing and reach 100 before `Completed`.
/// Exactly one of the three terminal variants (`Completed`, `Stopped`,
/// `Failed`) closes the stream; nothing follows it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum TranscriptionEvent {
    Progress(u8),
    Segment(TranscriptSegment),
    Completed { transcript: String },
    /// The user stopped the run; `transcript` holds whatever was merged
    /// before the cut. Deliberately not a failure.
    Stopped { transcript: String },
    Failed(RunError),
}

impl TranscriptionEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed { .. } | Self::Stopped { .. } | Self::Failed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_serializes_flat() {
        let segment = TranscriptSegment {
            start_ms: 30_000,
            end_ms: 31_500,
            text: "नमस्ते".to_string(),
        };
        let json = serde_json::to_value(&segment).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "start_ms": 30_000,
                "end_ms": 31_500,
                "text": "नमस्ते",
            })
        );
    }

    #[test]
    fn test_terminal_variants() {
        assert!(TranscriptionEvent::Completed {
            transcript: String::new()
        }
        .is_terminal());
        assert!(TranscriptionEvent::Failed(RunError::OutOfMemory).is_terminal());
        assert!(!TranscriptionEvent::Progress(50).is_terminal());
    }
}
