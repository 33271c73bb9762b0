use std::collections::HashMap;

/// Fraction of sentences a note summary keeps by default.
pub const DEFAULT_RATIO: f64 = 0.7;

/// Extractive summary of `text`: sentences are scored by the normalized
/// frequencies of their words and the top `ceil(ratio * count)` survive, in
/// their original order. No sentence is ever rewritten, so the summary is
/// always a subsequence of the input.
///
/// `ratio` is clamped to `(0, 1]`. Inputs with at most one sentence come
/// back trimmed but otherwise untouched.
pub fn summarize(text: &str, ratio: f64) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    // Latin terminators plus the Devanagari danda.
    let sentences: Vec<&str> = trimmed
        .split(['.', '!', '?', '।'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if sentences.len() <= 1 {
        return trimmed.to_string();
    }

    let mut frequencies: HashMap<String, u32> = HashMap::new();
    for sentence in &sentences {
        for word in sentence.split_whitespace() {
            *frequencies.entry(word.to_lowercase()).or_insert(0) += 1;
        }
    }
    let max_frequency = frequencies.values().copied().max().unwrap_or(1) as f64;

    let mut ranked: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .map(|(index, sentence)| {
            let score = sentence
                .split_whitespace()
                .map(|word| frequencies[&word.to_lowercase()] as f64 / max_frequency)
                .sum();
            (index, score)
        })
        .collect();

    let ratio = ratio.clamp(0.0, 1.0);
    let keep = ((ratio * sentences.len() as f64).ceil() as usize).clamp(1, sentences.len());

    // Stable sort: between equal scores the earlier sentence wins.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let mut selected: Vec<usize> = ranked[..keep].iter().map(|&(index, _)| index).collect();
    selected.sort_unstable();

    tracing::debug!(
        sentences = sentences.len(),
        kept = selected.len(),
        "summarized transcript"
    );

    selected
        .into_iter()
        .map(|index| sentences[index])
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_keeps_original_sentence_order() {
        // Scores: 3.0, 1.5, 4.0. The top two are the last and the first
        // sentence, re-emitted in input order.
        let text = "alpha beta gamma. delta epsilon. alpha beta gamma delta.";
        assert_eq!(
            summarize(text, 0.5),
            "alpha beta gamma alpha beta gamma delta"
        );
    }

    #[test]
    fn test_ratio_rounds_sentence_count_up() {
        // ceil(0.3 * 4) keeps two sentences, not one.
        let text = "common word here. common word again. rare filler. common word there.";
        assert_eq!(summarize(text, 0.3), "common word here common word again");
    }

    #[test]
    fn test_full_ratio_keeps_every_sentence() {
        let text = "alpha beta gamma. delta epsilon. alpha beta gamma delta.";
        assert_eq!(
            summarize(text, 1.0),
            "alpha beta gamma delta epsilon alpha beta gamma delta"
        );
    }

    #[test]
    fn test_danda_terminates_sentences() {
        let text = "राम घर गया। श्याम बाहर है। राम घर गया।";
        assert_eq!(summarize(text, 0.5), "राम घर गया राम घर गया");
    }

    #[test]
    fn test_single_sentence_comes_back_trimmed() {
        assert_eq!(
            summarize("  just one sentence without edges  ", DEFAULT_RATIO),
            "just one sentence without edges"
        );
    }

    #[test]
    fn test_empty_input_gives_empty_summary() {
        assert_eq!(summarize("", DEFAULT_RATIO), "");
        assert_eq!(summarize("   ", DEFAULT_RATIO), "");
    }

    #[test]
    fn test_out_of_range_ratio_is_clamped() {
        let text = "alpha beta gamma. delta epsilon. alpha beta gamma delta.";
        // Above one behaves like one.
        assert_eq!(summarize(text, 3.0), summarize(text, 1.0));
        // At or below zero still keeps a single sentence.
        assert_eq!(summarize(text, 0.0), "alpha beta gamma delta");
    }
}
