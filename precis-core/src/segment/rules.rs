//! Data-driven segmentation rules
//!
//! Rules are plain TOML so they can be tuned without touching the
//! segmenter. The English rule set is embedded at compile time and parsed
//! once per process.

use crate::error::{PrecisError, Result};
use log::warn;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

const EMBEDDED_ENGLISH: &str = include_str!("../../configs/languages/english.toml");

static ENGLISH: OnceLock<SegmentationRules> = OnceLock::new();

#[derive(Debug, Deserialize)]
struct RulesFile {
    metadata: MetadataConfig,
    terminators: TerminatorConfig,
    #[serde(default)]
    abbreviations: HashMap<String, Vec<String>>,
    #[serde(default)]
    sentence_starters: HashMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct MetadataConfig {
    code: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TerminatorConfig {
    chars: Vec<char>,
    #[serde(default)]
    closers: Vec<char>,
}

/// Boundary rules for one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentationRules {
    code: String,
    name: String,
    terminators: Vec<char>,
    closers: Vec<char>,
    abbreviations: HashSet<String>,
    sentence_starters: HashSet<String>,
}

impl SegmentationRules {
    /// Parse and validate a rules file
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: RulesFile = toml::from_str(content)
            .map_err(|e| PrecisError::Rules(format!("failed to parse rules: {e}")))?;

        let rules = Self {
            code: file.metadata.code,
            name: file.metadata.name,
            terminators: file.terminators.chars,
            closers: file.terminators.closers,
            abbreviations: flatten(file.abbreviations, true),
            sentence_starters: flatten(file.sentence_starters, false),
        };
        rules.validate()?;
        Ok(rules)
    }

    /// The embedded English rules
    ///
    /// Falls back to [`SegmentationRules::basic`] with a warning if the
    /// embedded file cannot be loaded.
    pub fn english() -> &'static SegmentationRules {
        ENGLISH.get_or_init(|| match Self::from_toml_str(EMBEDDED_ENGLISH) {
            Ok(rules) => rules,
            Err(e) => {
                warn!("failed to load embedded English rules, using basic rules: {e}");
                Self::basic()
            }
        })
    }

    /// Terminators only, no abbreviation handling
    pub fn basic() -> Self {
        Self {
            code: "basic".to_string(),
            name: "Basic".to_string(),
            terminators: vec!['.', '!', '?'],
            closers: vec!['"', '\'', ')', ']'],
            abbreviations: HashSet::new(),
            sentence_starters: HashSet::new(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(PrecisError::Rules("metadata.code must not be empty".to_string()));
        }
        if self.terminators.is_empty() {
            return Err(PrecisError::Rules("at least one terminator is required".to_string()));
        }
        if let Some(ch) = self.terminators.iter().find(|ch| ch.is_whitespace()) {
            return Err(PrecisError::Rules(format!("whitespace terminator {ch:?}")));
        }
        if let Some(ch) = self.closers.iter().find(|ch| self.terminators.contains(ch)) {
            return Err(PrecisError::Rules(format!(
                "{ch:?} is both a terminator and a closer"
            )));
        }
        Ok(())
    }

    /// Language code from the rules metadata
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name from the rules metadata
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn is_terminator(&self, ch: char) -> bool {
        self.terminators.contains(&ch)
    }

    pub(crate) fn is_closer(&self, ch: char) -> bool {
        self.closers.contains(&ch)
    }

    /// `token` is the text before a period, without the period
    pub(crate) fn is_abbreviation(&self, token: &str) -> bool {
        self.abbreviations.contains(&token.to_lowercase())
    }

    /// `word` is compared lowercased with surrounding punctuation removed
    pub(crate) fn is_sentence_starter(&self, word: &str) -> bool {
        let word: String = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        self.sentence_starters.contains(&word)
    }
}

impl Default for SegmentationRules {
    fn default() -> Self {
        Self::english().clone()
    }
}

fn flatten(categories: HashMap<String, Vec<String>>, strip_period: bool) -> HashSet<String> {
    categories
        .into_values()
        .flatten()
        .map(|entry| {
            let entry = entry.trim().to_lowercase();
            if strip_period {
                entry.trim_end_matches('.').to_string()
            } else {
                entry
            }
        })
        .filter(|entry| !entry.is_empty())
        .collect()
}
