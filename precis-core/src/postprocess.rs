//! Final summary assembly
//!
//! Turns concatenated chunk summaries into the final artifact: whitespace is
//! collapsed, repeated sentences are dropped, the text is cut to the word
//! limit of the requested [`SummaryLevel`] and keywords are extracted from
//! what remains.

use crate::error::{PrecisError, Result};
use crate::segment::{SegmentationRules, Segmenter};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Keywords returned unless configured otherwise
pub const DEFAULT_KEYWORD_COUNT: usize = 5;

/// Shortest token considered as a keyword
const MIN_KEYWORD_LEN: usize = 4;

/// Target length of the final summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLevel {
    /// At most 80 words
    Short,
    /// At most 150 words
    #[default]
    Medium,
    /// At most 250 words
    Long,
}

impl SummaryLevel {
    /// Maximum words in the final summary
    pub fn word_limit(self) -> usize {
        match self {
            Self::Short => 80,
            Self::Medium => 150,
            Self::Long => 250,
        }
    }
}

impl FromStr for SummaryLevel {
    type Err = PrecisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            other => Err(PrecisError::Config(format!(
                "unknown summary level '{other}' (expected short, medium or long)"
            ))),
        }
    }
}

impl fmt::Display for SummaryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        };
        f.write_str(name)
    }
}

/// The post-processed summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalSummary {
    /// Summary text
    pub text: String,
    /// Most frequent keywords, most frequent first
    pub keywords: Vec<String>,
    /// Level the text was limited to
    pub level: SummaryLevel,
    /// Words in `text`
    pub word_count: usize,
}

/// Post-process with the embedded English rules and five keywords
pub fn post_process(text: &str, level: SummaryLevel) -> FinalSummary {
    PostProcessor::default().process(text, level)
}

/// Configurable post-processing
#[derive(Debug, Clone)]
pub struct PostProcessor<'r> {
    keyword_count: usize,
    rules: &'r SegmentationRules,
}

impl Default for PostProcessor<'static> {
    fn default() -> Self {
        Self {
            keyword_count: DEFAULT_KEYWORD_COUNT,
            rules: SegmentationRules::english(),
        }
    }
}

impl<'r> PostProcessor<'r> {
    /// Post-processor using `rules` to find duplicate sentences
    pub fn new(rules: &'r SegmentationRules) -> Self {
        Self {
            keyword_count: DEFAULT_KEYWORD_COUNT,
            rules,
        }
    }

    /// Number of keywords to extract
    pub fn keyword_count(mut self, count: usize) -> Self {
        self.keyword_count = count;
        self
    }

    /// Run every post-processing step
    pub fn process(&self, text: &str, level: SummaryLevel) -> FinalSummary {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let deduplicated = self.dedup_sentences(&collapsed);
        let truncated = truncate_words(&deduplicated, level.word_limit());
        let keywords = extract_keywords(&truncated, self.keyword_count);

        FinalSummary {
            word_count: truncated.split_whitespace().count(),
            text: truncated,
            keywords,
            level,
        }
    }

    /// Drop sentences already seen, ignoring case; first occurrence wins
    pub fn dedup_sentences(&self, text: &str) -> String {
        let mut seen = HashSet::new();
        Segmenter::new(text, self.rules)
            .filter(|sentence| seen.insert(sentence.to_lowercase()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Keep the first `limit` whitespace-separated words
pub fn truncate_words(text: &str, limit: usize) -> String {
    text.split_whitespace()
        .take(limit)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Most frequent lowercase ASCII words of at least four letters
///
/// Ties are broken by first occurrence. Tokens are maximal runs of word
/// characters, so `"3rd"` or `"naïve"` are not candidates.
pub fn extract_keywords(text: &str, count: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    let tokens = lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| {
            token.len() >= MIN_KEYWORD_LEN && token.bytes().all(|b| b.is_ascii_alphabetic())
        });
    for token in tokens {
        match index.get(token) {
            Some(&slot) => order[slot].1 += 1,
            None => {
                index.insert(token, order.len());
                order.push((token, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
        .into_iter()
        .take(count)
        .map(|(token, _)| token.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parse_and_limits() {
        assert_eq!("short".parse::<SummaryLevel>().unwrap(), SummaryLevel::Short);
        assert_eq!(" LONG ".parse::<SummaryLevel>().unwrap(), SummaryLevel::Long);
        assert!("tiny".parse::<SummaryLevel>().is_err());
        assert_eq!(SummaryLevel::Short.word_limit(), 80);
        assert_eq!(SummaryLevel::default().word_limit(), 150);
        assert_eq!(SummaryLevel::Long.word_limit(), 250);
    }

    #[test]
    fn test_duplicate_sentences_removed() {
        let summary = post_process(
            "The plan worked.  Everyone agreed.\nTHE PLAN worked. Everyone agreed. Done.",
            SummaryLevel::Medium,
        );
        assert_eq!(summary.text, "The plan worked. Everyone agreed. Done.");
        assert_eq!(summary.word_count, 6);
    }

    #[test]
    fn test_truncation() {
        let text = "alpha ".repeat(300);
        let summary = post_process(&text, SummaryLevel::Short);
        assert_eq!(summary.word_count, 80);
        assert_eq!(summary.level, SummaryLevel::Short);
    }

    #[test]
    fn test_keywords_ranked_by_count_then_first_seen() {
        let keywords = extract_keywords(
            "River boats cross the river. Boats carry grain; grain feeds towns. River!",
            3,
        );
        assert_eq!(keywords, vec!["river", "boats", "grain"]);
    }

    #[test]
    fn test_keyword_token_rules() {
        let keywords = extract_keywords("the 3rd naïve cat_food rockets rockets", 5);
        assert_eq!(keywords, vec!["rockets"]);
    }

    #[test]
    fn test_empty_input() {
        let summary = post_process("", SummaryLevel::Long);
        assert_eq!(summary.text, "");
        assert!(summary.keywords.is_empty());
        assert_eq!(summary.word_count, 0);
    }
}
