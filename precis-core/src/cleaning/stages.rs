//! Individual noise-removal stages

use super::{CleaningError, CleaningOptions};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Bibliography headings, compared case-insensitively against a whole line
const REFERENCE_HEADINGS: [&str; 3] = ["references", "bibliography", "works cited"];

/// Lines with at most this many words can belong to a trailing footnote block
const FOOTNOTE_LINE_MAX_WORDS: usize = 10;

/// A single heuristic applied to the whole text
pub(crate) trait CleaningStage: Send + Sync {
    /// Stage name used in log records
    fn name(&self) -> &'static str;

    /// Apply the stage, returning the transformed text
    fn apply(&self, text: &str) -> Result<String, CleaningError>;
}

/// Build the enabled stages in their fixed order
pub(crate) fn enabled(options: &CleaningOptions) -> Vec<Box<dyn CleaningStage>> {
    let mut stages: Vec<Box<dyn CleaningStage>> = Vec::with_capacity(5);
    if options.remove_references {
        stages.push(Box::new(ReferencesStripper));
    }
    if options.remove_citations {
        stages.push(Box::new(CitationRemover));
    }
    if options.remove_footnotes {
        stages.push(Box::new(FootnoteRemover));
    }
    if options.remove_page_numbers {
        stages.push(Box::new(PageNumberRemover));
    }
    stages.push(Box::new(CharacterFilter {
        keep_punctuation: options.keep_punctuation,
    }));
    stages
}

/// Compile a pattern once per process
fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> Result<&'static Regex, CleaningError> {
    if let Some(re) = cell.get() {
        return Ok(re);
    }
    let re = Regex::new(pattern)?;
    Ok(cell.get_or_init(|| re))
}

/// Drops the first bibliography heading line and everything after it
pub(crate) struct ReferencesStripper;

impl CleaningStage for ReferencesStripper {
    fn name(&self) -> &'static str {
        "references"
    }

    fn apply(&self, text: &str) -> Result<String, CleaningError> {
        let mut offset = 0;
        for (index, line) in text.split_inclusive('\n').enumerate() {
            let candidate = line.trim();
            // A heading needs body text before it
            if index > 0
                && REFERENCE_HEADINGS
                    .iter()
                    .any(|heading| candidate.eq_ignore_ascii_case(heading))
            {
                return Ok(text[..offset].trim_end().to_string());
            }
            offset += line.len();
        }
        Ok(text.to_string())
    }
}

/// Removes inline citation markers
pub(crate) struct CitationRemover;

impl CitationRemover {
    fn pass(&self, text: &str) -> Result<String, CleaningError> {
        static NUMERIC_BRACKETS: OnceLock<Regex> = OnceLock::new();
        static PARENTHETICAL: OnceLock<Regex> = OnceLock::new();
        static YEAR: OnceLock<Regex> = OnceLock::new();
        static CARET_MARKER: OnceLock<Regex> = OnceLock::new();
        static SUPERSCRIPT_DIGITS: OnceLock<Regex> = OnceLock::new();
        static GLUED_MARKER: OnceLock<Regex> = OnceLock::new();
        static SHORT_BRACKETS: OnceLock<Regex> = OnceLock::new();
        static EMPTY_ENCLOSURE: OnceLock<Regex> = OnceLock::new();

        // [12], [12, 13], [12-15]
        let numeric = compiled(
            &NUMERIC_BRACKETS,
            r"\[\s*\d+(?:\s*[-\u{2013},]\s*\d+)*\s*\]",
        )?;
        let parenthetical = compiled(&PARENTHETICAL, r"\([^()]{1,120}\)")?;
        let year = compiled(&YEAR, r"\b(?:19|20)\d{2}\b")?;
        let caret = compiled(&CARET_MARKER, r"\^\d+")?;
        let superscript = compiled(
            &SUPERSCRIPT_DIGITS,
            r"[\u{00B9}\u{00B2}\u{00B3}\u{2070}\u{2074}-\u{2079}]+",
        )?;
        // Footnote marker glued to a sentence end: "shown.12 Next"
        let glued = compiled(
            &GLUED_MARKER,
            r#"(\p{L}{2}[.!?"\u{201D}\u{2019}])\d{1,3}(\s+\p{Lu}|\s*$)"#,
        )?;
        let short_brackets = compiled(&SHORT_BRACKETS, r"\[[^\[\]]{0,80}\]")?;
        let empty = compiled(&EMPTY_ENCLOSURE, r"\(\s*\)")?;

        let text = numeric.replace_all(text, "");
        let text = parenthetical.replace_all(&text, |caps: &Captures| {
            if year.is_match(&caps[0]) {
                String::new()
            } else {
                caps[0].to_string()
            }
        });
        let text = caret.replace_all(&text, "");
        let text = superscript.replace_all(&text, "");
        let text = glued.replace_all(&text, "${1}${2}");
        let text = short_brackets.replace_all(&text, "");
        let text = empty.replace_all(&text, "");
        Ok(text.into_owned())
    }
}

impl CleaningStage for CitationRemover {
    fn name(&self) -> &'static str {
        "citations"
    }

    fn apply(&self, text: &str) -> Result<String, CleaningError> {
        // Nested markers such as [[4]] need more than one pass
        let mut current = self.pass(text)?;
        loop {
            let next = self.pass(&current)?;
            if next == current {
                return Ok(current);
            }
            current = next;
        }
    }
}

/// Removes numbered footnote lines and a trailing block of short lines
pub(crate) struct FootnoteRemover;

impl CleaningStage for FootnoteRemover {
    fn name(&self) -> &'static str {
        "footnotes"
    }

    fn apply(&self, text: &str) -> Result<String, CleaningError> {
        static FOOTNOTE_LINE: OnceLock<Regex> = OnceLock::new();
        let footnote_line = compiled(&FOOTNOTE_LINE, r"(?m)^[ \t]*\d+\.[ \t]+\S.*$")?;

        let text = footnote_line.replace_all(text, "");
        let lines: Vec<&str> = text.lines().collect();

        // Only a block that follows a longer line is treated as footnotes
        let last_long = lines
            .iter()
            .rposition(|line| line.split_whitespace().count() > FOOTNOTE_LINE_MAX_WORDS);

        match last_long {
            Some(cutoff) if cutoff + 1 < lines.len() => {
                Ok(lines[..=cutoff].join("\n").trim().to_string())
            }
            _ => Ok(text.into_owned()),
        }
    }
}

/// Removes lines holding only a page number ("12", "Page 12", "p. 12")
pub(crate) struct PageNumberRemover;

impl CleaningStage for PageNumberRemover {
    fn name(&self) -> &'static str {
        "page-numbers"
    }

    fn apply(&self, text: &str) -> Result<String, CleaningError> {
        static PAGE_LINE: OnceLock<Regex> = OnceLock::new();
        let page_line = compiled(&PAGE_LINE, r"(?mi)^[ \t]*(?:page|p\.?)?[ \t]*\d+[ \t]*$")?;
        Ok(page_line.replace_all(text, "").into_owned())
    }
}

/// Removes control characters other than newline and tab, and optionally
/// all punctuation and symbols
pub(crate) struct CharacterFilter {
    pub(crate) keep_punctuation: bool,
}

impl CleaningStage for CharacterFilter {
    fn name(&self) -> &'static str {
        "characters"
    }

    fn apply(&self, text: &str) -> Result<String, CleaningError> {
        static CONTROL: OnceLock<Regex> = OnceLock::new();
        static NON_WORD: OnceLock<Regex> = OnceLock::new();

        let control = compiled(&CONTROL, r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F-\x9F]")?;
        let text = control.replace_all(text, "");
        if self.keep_punctuation {
            return Ok(text.into_owned());
        }

        let non_word = compiled(&NON_WORD, r"[^\w\s]")?;
        Ok(non_word.replace_all(&text, "").into_owned())
    }
}
