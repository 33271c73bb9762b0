mod gujarati;
mod hindi;
mod lexical;

pub use lexical::LexicalSegmenter;

/// Re-splits a raw transcript into readable paragraphs.
///
/// Implementations are pure text transforms: no model calls, no I/O. The
/// output order follows the input text and concatenating the paragraphs
/// (minus inserted punctuation) preserves the original wording.
pub trait TextSegmenter: Send + Sync {
    fn segment_text(&self, text: &str) -> Vec<String>;
}

/// Fallback for languages without dedicated segmentation rules: the
/// transcript comes back as a single paragraph, unchanged.
struct PassthroughSegmenter;

impl TextSegmenter for PassthroughSegmenter {
    fn segment_text(&self, text: &str) -> Vec<String> {
        vec![text.to_string()]
    }
}

/// Picks the segmenter for a two-letter language code.
pub fn segmenter_for(language: &str) -> Box<dyn TextSegmenter> {
    match language {
        "hi" => Box::new(LexicalSegmenter::hindi()),
        "gu" => Box::new(LexicalSegmenter::gujarati()),
        _ => Box::new(PassthroughSegmenter),
    }
}
