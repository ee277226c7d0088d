//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use precis_core::{PreparedDocument, SummaryReport, TextStats};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::Write;
use std::path::Path;

/// JSON formatter - outputs one entry per input file as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    entries: Vec<Value>,
    pretty: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            entries: Vec::new(),
            pretty: true,
        }
    }

    /// Pretty print the array
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn push(&mut self, source: &Path, key: &str, value: &impl Serialize) -> Result<()> {
        self.entries.push(json!({
            "source": source.display().to_string(),
            key: serde_json::to_value(value)?,
        }));
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_document(&mut self, source: &Path, document: &PreparedDocument) -> Result<()> {
        self.push(source, "document", document)
    }

    fn format_report(&mut self, source: &Path, report: &SummaryReport) -> Result<()> {
        self.push(source, "report", report)
    }

    fn format_stats(&mut self, source: &Path, stats: &TextStats) -> Result<()> {
        self.push(source, "stats", stats)
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.entries)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.entries)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::{prepared, SharedBuffer};

    #[test]
    fn test_document_entry() {
        let buffer = SharedBuffer::default();
        let mut formatter = JsonFormatter::new(buffer.clone());
        formatter
            .format_document(Path::new("book.txt"), &prepared())
            .unwrap();
        formatter.finish().unwrap();

        let value: Value = serde_json::from_str(&buffer.contents()).unwrap();
        let entry = &value[0];
        assert_eq!(entry["source"], "book.txt");
        assert_eq!(entry["document"]["language"], "en");
        assert_eq!(entry["document"]["stats"]["word_count"], 120);
        assert_eq!(entry["document"]["chunks"].as_array().unwrap().len(), 3);
        assert_eq!(entry["document"]["policy"]["overlap"], 10);
    }

    #[test]
    fn test_compact_output_is_one_line() {
        let buffer = SharedBuffer::default();
        let mut formatter = JsonFormatter::new(buffer.clone()).pretty(false);
        let stats = precis_core::compute_stats("One two three four. Five six!");
        formatter.format_stats(Path::new("a.txt"), &stats).unwrap();
        formatter.format_stats(Path::new("b.txt"), &stats).unwrap();
        formatter.finish().unwrap();

        let output = buffer.contents();
        assert_eq!(output.lines().count(), 1);
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[1]["source"], "b.txt");
        assert_eq!(value[1]["stats"]["sentence_count"], 2);
    }

    #[test]
    fn test_empty_run_writes_empty_array() {
        let buffer = SharedBuffer::default();
        let mut formatter = JsonFormatter::new(buffer.clone());
        formatter.finish().unwrap();
        assert_eq!(buffer.contents(), "[]\n");
    }
}
