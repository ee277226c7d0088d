//! Noise removal for extracted document text
//!
//! Strips non-narrative artifacts left behind by document extraction:
//! bibliography sections, inline citations, footnotes, page-number lines and
//! control characters. Each heuristic is a [`CleaningStage`] that can be
//! switched off through [`CleaningOptions`]. Stages run in a fixed order
//! because later stages operate on what earlier ones leave behind.
//!
//! The heuristics are lossy by nature: short bracketed annotations such as
//! `[see Figure 1]` are removed along with citation noise.

mod stages;

use crate::normalize::normalize;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) use stages::CleaningStage;

/// Failure inside a single cleaning stage
///
/// Never leaves this module: the failing stage is skipped and its input is
/// passed on unchanged.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// Regex compilation failed
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Switches for the individual noise-removal stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningOptions {
    /// Drop a trailing References / Bibliography / Works Cited section
    pub remove_references: bool,
    /// Drop bracketed, parenthetical and superscript citations
    pub remove_citations: bool,
    /// Drop numbered footnote lines and a trailing footnote block
    pub remove_footnotes: bool,
    /// Drop lines that only hold a page number
    pub remove_page_numbers: bool,
    /// Keep punctuation; when false every non-alphanumeric, non-whitespace
    /// character is removed
    pub keep_punctuation: bool,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self::all()
    }
}

impl CleaningOptions {
    /// Every removal stage enabled, punctuation kept
    pub fn all() -> Self {
        Self {
            remove_references: true,
            remove_citations: true,
            remove_footnotes: true,
            remove_page_numbers: true,
            keep_punctuation: true,
        }
    }

    /// Only control-character stripping and normalization
    pub fn none() -> Self {
        Self {
            remove_references: false,
            remove_citations: false,
            remove_footnotes: false,
            remove_page_numbers: false,
            keep_punctuation: true,
        }
    }
}

/// Remove extraction noise from text according to `options`
///
/// Runs the enabled stages followed by re-normalization, and repeats that
/// pass until the text stops changing, so the result is a fixed point:
/// `remove_noise(remove_noise(t, o), o) == remove_noise(t, o)`.
pub fn remove_noise(text: &str, options: &CleaningOptions) -> String {
    let stages = stages::enabled(options);

    // Passes after the first only delete or compose characters, so the
    // character count strictly decreases until the text is stable.
    let mut current = run_pass(text, &stages);
    let mut passes = 1;
    loop {
        let next = run_pass(&current, &stages);
        if next == current {
            debug!("noise removal stable after {passes} pass(es)");
            return current;
        }
        current = next;
        passes += 1;
    }
}

/// Normalize and remove noise in one call
pub fn clean(text: &str, options: &CleaningOptions) -> String {
    remove_noise(&normalize(text), options)
}

fn run_pass(text: &str, stages: &[Box<dyn CleaningStage>]) -> String {
    let mut current = text.to_string();
    for stage in stages {
        current = match stage.apply(&current) {
            Ok(output) => output,
            Err(e) => {
                warn!("cleaning stage '{}' failed, keeping its input: {e}", stage.name());
                current
            }
        };
    }
    normalize(&current)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Page 1\n\nHello world. This references a paper [3] and (Smith et al., 2021).\n\nReferences\n[3] Smith et al.";

    #[test]
    fn test_sample_document_all_options() {
        let cleaned = clean(SAMPLE, &CleaningOptions::all());
        assert_eq!(cleaned, "Hello world. This references a paper and .");
    }

    #[test]
    fn test_no_options_only_normalizes() {
        let cleaned = clean(SAMPLE, &CleaningOptions::none());
        assert!(cleaned.contains("References"));
        assert!(cleaned.contains("[3]"));
        assert!(cleaned.starts_with("Page 1"));
    }

    #[test]
    fn test_default_is_all() {
        assert_eq!(CleaningOptions::default(), CleaningOptions::all());
    }

    #[test]
    fn test_control_characters_always_removed() {
        let cleaned = remove_noise("bell\u{0007} and\u{0000} escape\u{001B}\u{0085}", &CleaningOptions::none());
        assert_eq!(cleaned, "bell and escape");
    }

    #[test]
    fn test_lone_carriage_returns_become_line_breaks() {
        let cleaned = remove_noise("first line\rsecond line", &CleaningOptions::none());
        assert_eq!(cleaned, "first line\nsecond line");
    }

    struct Failing;

    impl CleaningStage for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn apply(&self, _text: &str) -> Result<String, CleaningError> {
            Err(regex::Regex::new("(").unwrap_err().into())
        }
    }

    #[test]
    fn test_failed_stage_passes_input_on() {
        let stages: Vec<Box<dyn CleaningStage>> = vec![
            Box::new(Failing),
            Box::new(stages::CharacterFilter {
                keep_punctuation: false,
            }),
        ];
        assert_eq!(run_pass("Still  here, intact!", &stages), "Still here intact");
    }

    #[test]
    fn test_strip_punctuation() {
        let options = CleaningOptions {
            keep_punctuation: false,
            ..CleaningOptions::none()
        };
        assert_eq!(remove_noise("Wait, what?! It's 3:15.", &options), "Wait what Its 315");
    }

    #[test]
    fn test_remove_noise_idempotent_on_nested_noise() {
        let input = "Body text with nested [[4]] markers and ((Doe, 1999)) notes.\n\nWorks Cited\nDoe.";
        let options = CleaningOptions::all();
        let once = remove_noise(input, &options);
        assert_eq!(remove_noise(&once, &options), once);
        assert!(!once.contains("Works Cited"));
        assert!(!once.contains('['));
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: CleaningOptions = toml::from_str("remove_citations = false").unwrap();
        assert!(!options.remove_citations);
        assert!(options.remove_references);
        assert!(options.keep_punctuation);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean("", &CleaningOptions::all()), "");
    }
}
