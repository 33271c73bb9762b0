use std::collections::BTreeSet;

use regex::Regex;

use crate::TextSegmenter;

/// Minimum confidence a candidate boundary must exceed to split a sentence.
const CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Context window, in characters, inspected on each side of a candidate.
const SCORE_WINDOW_CHARS: usize = 50;

/// Sentences with fewer words than this are treated as noise and dropped.
const MIN_SENTENCE_WORDS: usize = 3;

/// Paragraphs at or below this length are filtered from the output.
const MIN_PARAGRAPH_CHARS: usize = 30;

/// Two or three capitalization-free words, the shape of a person or place
/// name in the scripts we handle.
const NAME_PATTERN: &str = r"[\p{L}]{2,}\s+[\p{L}]{2,}(?:\s+[\p{L}]{2,})?";

/// Static lexicon driving [`LexicalSegmenter`] for one language.
///
/// All entries are matched as plain substrings except `time_pattern`, which
/// is compiled as a regex when the segmenter is built.
pub(crate) struct LanguageProfile {
    pub(crate) language: &'static str,
    /// Verb suffixes that can close a finite clause. Only occurrences at
    /// word boundaries are considered, and each must clear the confidence
    /// score before it becomes a sentence boundary.
    pub(crate) sentence_endings: &'static [&'static str],
    /// Discourse markers that open a new topic. Seen after a candidate they
    /// raise its confidence; starting the next sentence they force a new
    /// paragraph.
    pub(crate) topic_transitions: &'static [&'static str],
    /// News-register openers. Anywhere in the following window they raise
    /// confidence; anywhere in the next sentence they force a paragraph.
    pub(crate) segment_starters: &'static [&'static str],
    /// Reported-speech verbs used to attribute a sentence to a speaker.
    pub(crate) speech_indicators: &'static [&'static str],
    /// Coordinating conjunctions. A candidate right before or after one is
    /// penalized, since the clause is still running.
    pub(crate) clause_conjunctions: &'static [&'static str],
    pub(crate) politics_keywords: &'static [&'static str],
    pub(crate) economy_keywords: &'static [&'static str],
    pub(crate) sports_keywords: &'static [&'static str],
    pub(crate) time_pattern: &'static str,
}

/// Rule-based segmenter for languages whose speech models emit unpunctuated
/// prose. Candidate boundaries come from clause-final verb suffixes and
/// topic transitions, each scored against its surrounding context; accepted
/// sentences are then regrouped into paragraphs wherever the topic, the
/// speaker, or the time reference shifts.
pub struct LexicalSegmenter {
    profile: &'static LanguageProfile,
    name_pattern: Regex,
    time_pattern: Regex,
}

impl LexicalSegmenter {
    pub fn hindi() -> Self {
        Self::new(&crate::hindi::PROFILE)
    }

    pub fn gujarati() -> Self {
        Self::new(&crate::gujarati::PROFILE)
    }

    fn new(profile: &'static LanguageProfile) -> Self {
        Self {
            profile,
            name_pattern: Regex::new(NAME_PATTERN).unwrap(),
            time_pattern: Regex::new(profile.time_pattern).unwrap(),
        }
    }

    /// Collects candidate split positions: every word-bounded clause-final
    /// suffix that clears the confidence score, plus the first occurrence of
    /// each space-delimited topic transition. Positions are byte offsets
    /// into `text`, deduplicated and ascending.
    fn find_potential_boundaries(&self, text: &str) -> Vec<usize> {
        let mut boundaries = BTreeSet::new();

        for pattern in self.profile.sentence_endings {
            for index in find_pattern_occurrences(text, pattern) {
                let position = index + pattern.len();
                if self.score_boundary(text, position) > CONFIDENCE_THRESHOLD {
                    boundaries.insert(position);
                }
            }
        }

        for transition in self.profile.topic_transitions {
            let padded = format!(" {transition} ");
            if let Some(index) = text.find(&padded) {
                if index > 0 {
                    boundaries.insert(index);
                }
            }
        }

        boundaries.into_iter().collect()
    }

    /// Scores a candidate boundary from the text around it. Starts at 0.5,
    /// rewarded when the following window opens a new topic or names a new
    /// actor, penalized when a conjunction spans the split or too few words
    /// precede it. A candidate at the very end of the text is certain.
    fn score_boundary(&self, text: &str, position: usize) -> f64 {
        if position >= text.len() {
            return 1.0;
        }

        let before = chars_before(text, position, SCORE_WINDOW_CHARS);
        let after = chars_after(text, position, SCORE_WINDOW_CHARS);
        let after_trimmed = after.trim_start();

        let mut confidence = 0.5;

        if self
            .profile
            .topic_transitions
            .iter()
            .any(|t| after_trimmed.starts_with(t))
        {
            confidence += 0.3;
        }
        if self.profile.segment_starters.iter().any(|s| after.contains(s)) {
            confidence += 0.2;
        }
        if self.name_pattern.is_match(after_trimmed) {
            confidence += 0.2;
        }
        if self
            .profile
            .clause_conjunctions
            .iter()
            .any(|c| before.ends_with(c) || after_trimmed.starts_with(c))
        {
            confidence -= 0.2;
        }
        if before.split(' ').count() < MIN_SENTENCE_WORDS {
            confidence -= 0.3;
        }

        confidence
    }

    /// Joins accumulated sentences with ". " and closes each paragraph with
    /// a final period. A new paragraph starts wherever
    /// [`Self::should_start_new_paragraph`] fires; paragraphs at or below
    /// the length floor are dropped.
    fn group_into_paragraphs(&self, sentences: &[&str]) -> Vec<String> {
        let mut paragraphs = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for (index, &sentence) in sentences.iter().enumerate() {
            current.push(sentence);
            let next = sentences.get(index + 1).copied();
            if self.should_start_new_paragraph(sentence, next) {
                paragraphs.push(format!("{}.", current.join(". ")));
                current.clear();
            }
        }

        if !current.is_empty() {
            paragraphs.push(format!("{}.", current.join(". ")));
        }

        paragraphs.retain(|p| p.chars().count() > MIN_PARAGRAPH_CHARS);
        paragraphs
    }

    fn should_start_new_paragraph(&self, current: &str, next: Option<&str>) -> bool {
        let Some(next) = next else {
            return true;
        };

        let next_trimmed = next.trim_start();
        if self
            .profile
            .topic_transitions
            .iter()
            .any(|t| next_trimmed.starts_with(t))
        {
            return true;
        }
        if self.profile.segment_starters.iter().any(|s| next.contains(s)) {
            return true;
        }

        let current_speaker = self.extract_speaker(current);
        let next_speaker = self.extract_speaker(next);
        if !current_speaker.is_empty() && !next_speaker.is_empty() && current_speaker != next_speaker
        {
            return true;
        }

        if self.has_subject_change(current, next) {
            return true;
        }

        self.has_time_change(current, next)
    }

    /// The two words preceding the first reported-speech verb, or an empty
    /// string when no attribution is found.
    fn extract_speaker(&self, sentence: &str) -> String {
        for indicator in self.profile.speech_indicators {
            if let Some(index) = sentence.find(indicator) {
                if index > 0 {
                    let before = sentence[..index].trim();
                    let words: Vec<&str> = before.split(' ').collect();
                    if words.len() >= 2 {
                        return words[words.len() - 2..].join(" ");
                    }
                }
            }
        }
        String::new()
    }

    fn subject_of(&self, sentence: &str) -> Subject {
        if self
            .profile
            .politics_keywords
            .iter()
            .any(|k| sentence.contains(k))
        {
            Subject::Politics
        } else if self
            .profile
            .economy_keywords
            .iter()
            .any(|k| sentence.contains(k))
        {
            Subject::Economy
        } else if self
            .profile
            .sports_keywords
            .iter()
            .any(|k| sentence.contains(k))
        {
            Subject::Sports
        } else {
            Subject::General
        }
    }

    fn has_subject_change(&self, current: &str, next: &str) -> bool {
        let a = self.subject_of(current);
        let b = self.subject_of(next);
        a != Subject::General && b != Subject::General && a != b
    }

    /// Compares the first time reference in each sentence. Only fires when
    /// both sentences carry one and they differ.
    fn has_time_change(&self, current: &str, next: &str) -> bool {
        let current_time = self.time_pattern.find(current).map(|m| m.as_str());
        let next_time = self.time_pattern.find(next).map(|m| m.as_str());
        matches!((current_time, next_time), (Some(a), Some(b)) if a != b)
    }
}

impl TextSegmenter for LexicalSegmenter {
    fn segment_text(&self, text: &str) -> Vec<String> {
        let boundaries = self.find_potential_boundaries(text);
        let sentences = extract_sentences(text, &boundaries);
        let paragraphs = self.group_into_paragraphs(&sentences);
        tracing::debug!(
            language = self.profile.language,
            boundaries = boundaries.len(),
            sentences = sentences.len(),
            paragraphs = paragraphs.len(),
            "segmented transcript"
        );
        paragraphs
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Subject {
    Politics,
    Economy,
    Sports,
    General,
}

/// All word-bounded occurrences of `pattern`: a space (or the text start)
/// immediately before, whitespace (or the text end) immediately after.
fn find_pattern_occurrences(text: &str, pattern: &str) -> Vec<usize> {
    let mut occurrences = Vec::new();
    let mut index = 0;

    while index < text.len() {
        let Some(found) = text[index..].find(pattern).map(|i| i + index) else {
            break;
        };

        let before_ok = text[..found].chars().next_back().map_or(true, |c| c == ' ');
        let end = found + pattern.len();
        let after_ok = text[end..].chars().next().map_or(true, char::is_whitespace);
        if before_ok && after_ok {
            occurrences.push(found);
        }

        index = match text[found..].chars().next() {
            Some(c) => found + c.len_utf8(),
            None => break,
        };
    }

    occurrences
}

/// Cuts `text` at the boundary positions. Spans between boundaries become
/// sentences when they carry enough words; whatever trails the last boundary
/// is kept regardless, so no wording is ever lost at the tail.
fn extract_sentences<'a>(text: &'a str, boundaries: &[usize]) -> Vec<&'a str> {
    let mut sentences = Vec::new();
    let mut last_index = 0;

    for &boundary in boundaries {
        if boundary > last_index {
            let sentence = text[last_index..boundary].trim();
            if !sentence.is_empty() && sentence.split(' ').count() >= MIN_SENTENCE_WORDS {
                sentences.push(sentence);
            }
            last_index = boundary;
        }
    }

    if last_index < text.len() {
        let remaining = text[last_index..].trim();
        if !remaining.is_empty() {
            sentences.push(remaining);
        }
    }

    sentences
}

/// The last `n` characters of `text[..pos]`; shorter near the text start.
fn chars_before(text: &str, pos: usize, n: usize) -> &str {
    let start = text[..pos]
        .char_indices()
        .rev()
        .nth(n - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &text[start..pos]
}

/// The first `n` characters of `text[pos..]`; shorter near the text end.
fn chars_after(text: &str, pos: usize, n: usize) -> &str {
    match text[pos..].char_indices().nth(n) {
        Some((i, _)) => &text[pos..pos + i],
        None => &text[pos..],
    }
}
