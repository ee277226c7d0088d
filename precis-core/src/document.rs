//! Raw extracted documents

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Format the text was extracted from
///
/// Informational only: no processing step depends on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Plain text
    Txt,
    /// Markdown
    Markdown,
    /// PDF (text extracted elsewhere)
    Pdf,
    /// Word document (text extracted elsewhere)
    Docx,
    /// Anything else
    #[default]
    Unknown,
}

impl SourceFormat {
    /// Guess the format from a file extension, ignoring case
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "txt" | "text" => Self::Txt,
            "md" | "markdown" => Self::Markdown,
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            _ => Self::Unknown,
        }
    }

    /// Guess the format from a path's extension
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(Self::Unknown, Self::from_extension)
    }

    /// Whether the format is readable as UTF-8 text without extraction
    pub fn is_plain_text(self) -> bool {
        matches!(self, Self::Txt | Self::Markdown | Self::Unknown)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Txt => "txt",
            Self::Markdown => "markdown",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Unprocessed document text plus its source format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    text: String,
    format: SourceFormat,
}

impl RawDocument {
    /// Wrap extracted text
    pub fn new(text: impl Into<String>, format: SourceFormat) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }

    /// Wrap text of unknown origin
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(text, SourceFormat::Unknown)
    }

    /// Read a UTF-8 text file, deriving the format from its extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Ok(Self::new(text, SourceFormat::from_path(path)))
    }

    /// The raw text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The source format tag
    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// Whitespace-separated words in the raw text
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

impl From<&str> for RawDocument {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<String> for RawDocument {
    fn from(text: String) -> Self {
        Self::from_text(text)
    }
}
