//! Descriptive statistics for cleaned text

use crate::segment::{SegmentationRules, Segmenter};
use serde::{Deserialize, Serialize};

/// Average silent reading speed used for the time estimate
pub const WORDS_PER_MINUTE: f64 = 200.0;

/// Word, character and sentence counts of a text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStats {
    /// Whitespace-separated words
    pub word_count: usize,
    /// Unicode scalar values, whitespace included
    pub char_count: usize,
    /// Sentences found by the segmenter
    pub sentence_count: usize,
    /// Words per sentence
    pub avg_sentence_length: f64,
    /// `word_count / 200`, rounded to two decimals
    pub estimated_read_time_minutes: f64,
}

/// Compute statistics with the embedded English rules
pub fn compute_stats(text: &str) -> TextStats {
    compute_stats_with(text, SegmentationRules::english())
}

/// Compute statistics with custom segmentation rules
pub fn compute_stats_with(text: &str, rules: &SegmentationRules) -> TextStats {
    let word_count = text.split_whitespace().count();
    let char_count = text.chars().count();
    let sentence_count = Segmenter::new(text, rules).count();

    TextStats {
        word_count,
        char_count,
        sentence_count,
        avg_sentence_length: word_count as f64 / sentence_count.max(1) as f64,
        estimated_read_time_minutes: round2(word_count as f64 / WORDS_PER_MINUTE),
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let stats = compute_stats("");
        assert_eq!(stats, TextStats::default());
        assert_eq!(stats.avg_sentence_length, 0.0);
        assert_eq!(stats.estimated_read_time_minutes, 0.0);
    }

    #[test]
    fn test_counts() {
        let stats = compute_stats("One two three four. Five six!");
        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 29);
        assert_eq!(stats.sentence_count, 2);
        assert_eq!(stats.avg_sentence_length, 3.0);
        assert_eq!(stats.estimated_read_time_minutes, 0.03);
    }

    #[test]
    fn test_text_without_terminator_is_one_sentence() {
        let stats = compute_stats("no punctuation here");
        assert_eq!(stats.sentence_count, 1);
        assert_eq!(stats.avg_sentence_length, 3.0);
    }

    #[test]
    fn test_average_is_the_exact_quotient() {
        let stats = compute_stats("One two three. Four five. Six seven.");
        assert_eq!(stats.sentence_count, 3);
        assert_eq!(stats.avg_sentence_length, 7.0 / 3.0);
    }

    #[test]
    fn test_read_time() {
        let text = vec!["word"; 450].join(" ");
        assert_eq!(compute_stats(&text).estimated_read_time_minutes, 2.25);
    }
}
