//! Rule-based sentence segmentation
//!
//! A boundary is a run of terminators (plus trailing closing quotes or
//! brackets) followed by whitespace or the end of the text. Ambiguous
//! periods are resolved with the abbreviation and sentence-starter lists in
//! [`SegmentationRules`]:
//!
//! - a period after a known abbreviation or a single capital initial ends
//!   a sentence only if a capitalized sentence starter follows
//! - a period followed by a lowercase word never ends a sentence
//! - an ellipsis ends a sentence only before an uppercase letter or the end
//!   of the text
//!
//! A blank line always ends a sentence. Decimal numbers and dotted
//! acronyms are never split because no whitespace follows their periods.

mod rules;

pub use rules::SegmentationRules;

/// Split `text` into sentences using the embedded English rules
///
/// Empty input yields an empty vector.
pub fn segment(text: &str) -> Vec<String> {
    segment_with(text, SegmentationRules::english())
}

/// Split `text` into sentences using `rules`
pub fn segment_with(text: &str, rules: &SegmentationRules) -> Vec<String> {
    Segmenter::new(text, rules).map(str::to_string).collect()
}

/// Lazy sentence iterator over borrowed text
///
/// Cloning the iterator (or calling [`Segmenter::new`] again) restarts the
/// sequence; sentences are trimmed slices of the input.
#[derive(Debug, Clone)]
pub struct Segmenter<'a> {
    text: &'a str,
    rules: &'a SegmentationRules,
    pos: usize,
}

impl<'a> Segmenter<'a> {
    /// Create a segmenter positioned at the start of `text`
    pub fn new(text: &'a str, rules: &'a SegmentationRules) -> Self {
        Self {
            text,
            rules,
            pos: 0,
        }
    }

    /// Find the end of the sentence starting at `start`
    ///
    /// Returns `(sentence_end, resume_at)` as byte offsets.
    fn find_boundary(&self, start: usize) -> (usize, usize) {
        let text = self.text;
        let mut i = start;

        while let Some(ch) = text[i..].chars().next() {
            if ch == '\n' && starts_blank_line(&text[i + 1..]) {
                return (i, i + 1);
            }

            if !self.rules.is_terminator(ch) {
                i += ch.len_utf8();
                continue;
            }

            let run_start = i;
            let mut run_end = i;
            while let Some(next) = text[run_end..].chars().next() {
                if !self.rules.is_terminator(next) {
                    break;
                }
                run_end += next.len_utf8();
            }
            let mut end = run_end;
            while let Some(next) = text[end..].chars().next() {
                if !self.rules.is_closer(next) {
                    break;
                }
                end += next.len_utf8();
            }

            let after = &text[end..];
            match after.chars().next() {
                None => return (end, end),
                Some(next) if next.is_whitespace() => {
                    if self.is_boundary(&text[start..run_start], &text[run_start..run_end], after) {
                        return (end, end);
                    }
                }
                Some(_) => {}
            }
            i = end;
        }

        (text.len(), text.len())
    }

    /// Decide whether a terminator run followed by whitespace ends a sentence
    fn is_boundary(&self, before: &str, run: &str, after: &str) -> bool {
        let gap_end = after
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(after.len());
        let gap = &after[..gap_end];
        if gap_end == after.len() || gap.matches('\n').count() >= 2 {
            return true;
        }

        let next_word = after[gap_end..]
            .split_whitespace()
            .next()
            .unwrap_or_default();
        let next_initial = next_word.chars().find(|c| c.is_alphanumeric());
        let next_upper = next_initial.is_some_and(char::is_uppercase);
        let next_lower = next_initial.is_some_and(char::is_lowercase);

        let is_ellipsis = run.contains('…') || (run.len() > 1 && run.chars().all(|c| c == '.'));
        if is_ellipsis {
            return next_upper;
        }
        if run != "." {
            return true;
        }

        let token = before
            .split_whitespace()
            .next_back()
            .unwrap_or_default()
            .trim_start_matches(|c: char| !c.is_alphanumeric());
        if self.rules.is_abbreviation(token) || is_initial(token) {
            return next_upper && self.rules.is_sentence_starter(next_word);
        }

        !next_lower
    }
}

impl<'a> Iterator for Segmenter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rest = &self.text[self.pos..];
            let skipped = rest.len() - rest.trim_start().len();
            let start = self.pos + skipped;
            if start >= self.text.len() {
                self.pos = self.text.len();
                return None;
            }

            let (end, resume) = self.find_boundary(start);
            self.pos = resume;
            let sentence = self.text[start..end].trim();
            if !sentence.is_empty() {
                return Some(sentence);
            }
        }
    }
}

fn starts_blank_line(rest: &str) -> bool {
    rest.trim_start_matches([' ', '\t']).starts_with('\n')
}

fn is_initial(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}
