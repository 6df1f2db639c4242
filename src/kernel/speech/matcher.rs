use super::dedup::Deduplicator;
use super::normalize::normalize;
use crate::kernel::time::Timestamp;

/// Minimum utterance/target length ratio for a truncated utterance to count.
pub const CONTAINMENT_RATIO: f64 = 0.6;
/// Minimum share of target words that must show up in the utterance.
pub const WORD_OVERLAP_RATIO: f64 = 0.6;

/// Heuristic check that `utterance` is a repetition of the already normalized target.
///
/// Tiers are evaluated in order and short-circuit:
/// 1. utterance contains the target (exact or run-on speech)
/// 2. target contains the utterance and it is long enough (truncated recognition)
/// 3. enough target words overlap an utterance word in either direction
///
/// The thresholds are empirical. Expect false positives and negatives.
pub fn is_match(utterance: &str, normalized_target: &str) -> bool {
    if normalized_target.is_empty() {
        return false;
    }

    let spoken = normalize(utterance);
    if spoken.is_empty() {
        return false;
    }

    if spoken.contains(normalized_target) {
        return true;
    }

    let spoken_len = spoken.chars().count() as f64;
    let target_len = normalized_target.chars().count() as f64;
    if normalized_target.contains(spoken.as_str()) && spoken_len >= CONTAINMENT_RATIO * target_len {
        return true;
    }

    word_overlap(&spoken, normalized_target) >= WORD_OVERLAP_RATIO
}

/// Fraction of target words that contain, or are contained by, some spoken word.
fn word_overlap(spoken: &str, target: &str) -> f64 {
    let spoken_words: Vec<&str> = spoken.split_whitespace().collect();
    let target_words: Vec<&str> = target.split_whitespace().collect();

    if target_words.is_empty() {
        return 0.0;
    }

    let matching = target_words
        .iter()
        .filter(|tw| {
            spoken_words
                .iter()
                .any(|sw| sw.contains(**tw) || tw.contains(*sw))
        })
        .count();

    matching as f64 / target_words.len() as f64
}

/// Outcome of feeding one finalized utterance through dedup and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementVerdict {
    /// Same statement already seen in this dedup bucket.
    Duplicate,
    /// Empty or whitespace-only text.
    Blank,
    Evaluated { is_match: bool },
}

/// Owns the current target phrase and the dedup record for it.
#[derive(Debug)]
pub struct PhraseMatcher {
    target: String,
    normalized_target: String,
    dedup: Deduplicator,
}

impl PhraseMatcher {
    pub fn new(bucket_ms: u64) -> Self {
        Self {
            target: String::new(),
            normalized_target: String::new(),
            dedup: Deduplicator::new(bucket_ms),
        }
    }

    /// Replaces the target. Always clears dedup state, even for the same text.
    pub fn set_target(&mut self, phrase: &str) {
        self.target = phrase.to_string();
        self.normalized_target = normalize(phrase);
        self.dedup.reset();
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn normalized_target(&self) -> &str {
        &self.normalized_target
    }

    /// Clears dedup state without touching the target (round restart).
    pub fn reset(&mut self) {
        self.dedup.reset();
    }

    pub fn is_match(&self, utterance: &str) -> bool {
        is_match(utterance, &self.normalized_target)
    }

    /// Dedup first, then match. Blank text is rejected before it can occupy a
    /// dedup slot. Punctuation-only text is evaluated and simply fails to match.
    pub fn evaluate(&mut self, text: &str, now: Timestamp) -> StatementVerdict {
        if text.trim().is_empty() {
            return StatementVerdict::Blank;
        }
        if !self.dedup.should_process(text, now) {
            return StatementVerdict::Duplicate;
        }
        StatementVerdict::Evaluated { is_match: self.is_match(text) }
    }
}
