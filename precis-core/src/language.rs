//! Best-effort language detection
//!
//! Detection is a pluggable capability behind [`LanguageDetector`]. The
//! pipeline never fails because of it: [`detect_or_unknown`] turns any
//! detector error into the [`LanguageTag::unknown`] sentinel and logs it.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use stop_words::{get, LANGUAGE};
use thiserror::Error;

/// Characters inspected by [`StopwordDetector`]
pub const DETECTION_SAMPLE_CHARS: usize = 20_000;

/// Minimum stopword hits before a language is reported
const MIN_STOPWORD_HITS: usize = 3;

const UNKNOWN: &str = "unknown";

/// Language code such as `"en"`, or `"unknown"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Tag for a language code
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Sentinel used when detection fails
    pub fn unknown() -> Self {
        Self(UNKNOWN.to_string())
    }

    /// Whether this is the sentinel
    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN
    }

    /// The language code
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageTag {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a detector could not name a language
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageDetectionError {
    /// Nothing to analyze
    #[error("no text to analyze")]
    EmptyInput,

    /// Too few recognizable words
    #[error("no language signal in {words} words")]
    NoSignal {
        /// Words inspected
        words: usize,
    },

    /// Failure inside an external detector
    #[error("detector failed: {0}")]
    Backend(String),
}

/// Capability for naming the language of a text
pub trait LanguageDetector: Send + Sync {
    /// Detect the dominant language of `text`
    fn detect_language(&self, text: &str) -> Result<LanguageTag, LanguageDetectionError>;
}

/// Run `detector`, falling back to [`LanguageTag::unknown`] on failure
pub fn detect_or_unknown(detector: &dyn LanguageDetector, text: &str) -> LanguageTag {
    match detector.detect_language(text) {
        Ok(tag) => tag,
        Err(e) => {
            warn!("language detection failed, using '{UNKNOWN}': {e}");
            LanguageTag::unknown()
        }
    }
}

/// Scores a text sample against stopword lists
///
/// The language whose list matches the most sample words wins; ties go to
/// the language listed first.
#[derive(Debug, Clone)]
pub struct StopwordDetector {
    profiles: Vec<(&'static str, HashSet<String>)>,
    sample_chars: usize,
}

impl Default for StopwordDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwordDetector {
    /// Detector for en, de, fr, es, it, pt and nl
    pub fn new() -> Self {
        let languages = [
            ("en", LANGUAGE::English),
            ("de", LANGUAGE::German),
            ("fr", LANGUAGE::French),
            ("es", LANGUAGE::Spanish),
            ("it", LANGUAGE::Italian),
            ("pt", LANGUAGE::Portuguese),
            ("nl", LANGUAGE::Dutch),
        ];
        let profiles = languages
            .into_iter()
            .map(|(code, language)| {
                let words = get(language).iter().map(|s| s.to_string()).collect();
                (code, words)
            })
            .collect();

        Self {
            profiles,
            sample_chars: DETECTION_SAMPLE_CHARS,
        }
    }

    /// Change how many leading characters are inspected
    pub fn with_sample_chars(mut self, sample_chars: usize) -> Self {
        self.sample_chars = sample_chars.max(1);
        self
    }
}

impl LanguageDetector for StopwordDetector {
    fn detect_language(&self, text: &str) -> Result<LanguageTag, LanguageDetectionError> {
        let sample = match text.char_indices().nth(self.sample_chars) {
            Some((end, _)) => &text[..end],
            None => text,
        };

        let words: Vec<String> = sample
            .split_whitespace()
            .map(|token| {
                token
                    .trim_matches(|c: char| !c.is_alphabetic())
                    .to_lowercase()
            })
            .filter(|word| !word.is_empty())
            .collect();
        if words.is_empty() {
            return Err(LanguageDetectionError::EmptyInput);
        }

        let mut best: Option<(&str, usize)> = None;
        for (code, stopwords) in &self.profiles {
            let hits = words.iter().filter(|word| stopwords.contains(*word)).count();
            debug!("language '{code}': {hits} stopword hit(s)");
            if best.map_or(true, |(_, top)| hits > top) {
                best = Some((*code, hits));
            }
        }

        match best {
            Some((code, hits)) if hits >= MIN_STOPWORD_HITS => Ok(LanguageTag::new(code)),
            _ => Err(LanguageDetectionError::NoSignal { words: words.len() }),
        }
    }
}
