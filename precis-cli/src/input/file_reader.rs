//! File reading utilities

use crate::error::CliError;
use anyhow::{Context, Result};
use precis_core::{RawDocument, SourceFormat};
use std::fs;
use std::path::Path;

/// Reads input files as UTF-8 documents
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read a plain-text document, tagging it with the format guessed from
    /// its extension
    ///
    /// PDF and DOCX need external text extraction and are rejected.
    pub fn read_document(path: &Path) -> Result<RawDocument> {
        let format = SourceFormat::from_path(path);
        if !format.is_plain_text() {
            return Err(CliError::UnsupportedFormat(format!(
                "{} ({format}); extract its text first",
                path.display()
            ))
            .into());
        }

        let text = Self::read_text(path)?;
        log::debug!("read {} bytes from {}", text.len(), path.display());
        Ok(RawDocument::new(text, format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");

        let content = "Hello, world!\nThis is a test.";
        fs::write(&file_path, content).unwrap();

        assert_eq!(FileReader::read_text(&file_path).unwrap(), content);
    }

    #[test]
    fn test_read_text_nonexistent_file() {
        let err = FileReader::read_text(Path::new("/nonexistent/file.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_read_document_keeps_format() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("notes.md");
        fs::write(&file_path, "# Notes\n\nSome text.").unwrap();

        let document = FileReader::read_document(&file_path).unwrap();
        assert_eq!(document.format(), SourceFormat::Markdown);
        assert_eq!(document.word_count(), 4);
    }

    #[test]
    fn test_read_document_rejects_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("scan.pdf");
        fs::write(&file_path, "%PDF-1.7").unwrap();

        let err = FileReader::read_document(&file_path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::UnsupportedFormat(_))
        ));
    }
}
