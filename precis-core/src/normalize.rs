//! Unicode and whitespace normalization
//!
//! First and last step of cleaning. The output uses `\n` line endings only,
//! has single spaces between words, no whitespace at line edges, at most one
//! blank line between paragraphs, and no leading or trailing whitespace.

use unicode_normalization::UnicodeNormalization;

/// Maximum consecutive line feeds kept (one blank line)
const MAX_NEWLINES: usize = 2;

/// Normalize text for downstream comparison and counting
///
/// Applies NFKC so visually identical characters compare equal, unifies
/// line endings, collapses horizontal whitespace and caps blank-line runs.
/// Empty input yields empty output.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let composed: String = text.nfkc().collect();
    let mut out = String::with_capacity(composed.len());
    let mut chars = composed.chars().peekable();
    let mut pending_space = false;
    let mut newlines = 0usize;

    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                newlines += 1;
                pending_space = false;
            }
            '\n' => {
                newlines += 1;
                pending_space = false;
            }
            ' ' | '\t' => {
                // Whitespace right after a line break is line-edge whitespace
                if newlines == 0 {
                    pending_space = true;
                }
            }
            _ => {
                if newlines > 0 {
                    if !out.is_empty() {
                        for _ in 0..newlines.min(MAX_NEWLINES) {
                            out.push('\n');
                        }
                    }
                    newlines = 0;
                    pending_space = false;
                } else if pending_space {
                    if !out.is_empty() {
                        out.push(' ');
                    }
                    pending_space = false;
                }
                out.push(ch);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  \n\t \r\n "), "");
    }

    #[test]
    fn test_line_endings_unified() {
        assert_eq!(normalize("one\r\ntwo\rthree\nfour"), "one\ntwo\nthree\nfour");
    }

    #[test]
    fn test_horizontal_whitespace_collapsed() {
        assert_eq!(normalize("a  \t b\t\tc"), "a b c");
    }

    #[test]
    fn test_blank_line_runs_capped() {
        assert_eq!(normalize("para one\n\n\n\n\npara two"), "para one\n\npara two");
        assert_eq!(normalize("para one\n \n\t\n \npara two"), "para one\n\npara two");
    }

    #[test]
    fn test_line_edge_whitespace_removed() {
        assert_eq!(normalize("  first  \n   second   "), "first\nsecond");
    }

    #[test]
    fn test_compatibility_characters_folded() {
        // Ligature, full-width letters and no-break space
        assert_eq!(normalize("\u{FB01}ne"), "fine");
        assert_eq!(normalize("\u{FF21}\u{FF22}"), "AB");
        assert_eq!(normalize("a\u{00A0}b"), "a b");
    }

    #[test]
    fn test_idempotent() {
        let input = " \u{FB01}rst\r\n\r\n\r\n  second\t line  ";
        let once = normalize(input);
        assert_eq!(normalize(&once), once);
    }
}
