//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use precis_core::{PreparedDocument, SummaryReport, TextStats};
use std::io::Write;
use std::path::Path;

/// Markdown formatter - one top-level section per input file
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    include_cleaned_text: bool,
    file_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            include_cleaned_text: false,
            file_count: 0,
        }
    }

    /// Add a "Cleaned text" section to prepared documents
    pub fn include_cleaned_text(mut self, include: bool) -> Self {
        self.include_cleaned_text = include;
        self
    }

    fn heading(&mut self, source: &Path) -> Result<()> {
        self.file_count += 1;
        writeln!(self.writer, "# {}", source.display())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn stats_list(&mut self, stats: &TextStats) -> Result<()> {
        writeln!(self.writer, "- **Words:** {}", stats.word_count)?;
        writeln!(self.writer, "- **Characters:** {}", stats.char_count)?;
        writeln!(self.writer, "- **Sentences:** {}", stats.sentence_count)?;
        writeln!(
            self.writer,
            "- **Average sentence length:** {}",
            stats.avg_sentence_length
        )?;
        writeln!(
            self.writer,
            "- **Estimated read time:** {} min",
            stats.estimated_read_time_minutes
        )?;
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_document(&mut self, source: &Path, document: &PreparedDocument) -> Result<()> {
        self.heading(source)?;
        writeln!(self.writer, "- **Language:** {}", document.language)?;
        self.stats_list(&document.stats)?;
        writeln!(
            self.writer,
            "- **Chunks:** {} ({}, size {}, overlap {})",
            document.chunks.len(),
            document.policy.strategy(),
            document.policy.chunk_size(),
            document.policy.overlap()
        )?;

        if self.include_cleaned_text {
            writeln!(self.writer)?;
            writeln!(self.writer, "## Cleaned text")?;
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", document.cleaned_text)?;
        }

        for chunk in &document.chunks {
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "## Chunk {} ({} words)",
                chunk.chunk_id, chunk.word_count
            )?;
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", chunk.text)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn format_report(&mut self, source: &Path, report: &SummaryReport) -> Result<()> {
        let summary = &report.summary;
        self.heading(source)?;
        writeln!(self.writer, "## Summary ({})", summary.level)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", summary.text)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "**Keywords:** {}", summary.keywords.join(", "))?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "*{} words from {} chunks*",
            summary.word_count,
            report.chunk_summaries.len()
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn format_stats(&mut self, source: &Path, stats: &TextStats) -> Result<()> {
        self.heading(source)?;
        self.stats_list(stats)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total files: {}*", self.file_count)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::{prepared, sample_text, SharedBuffer};
    use precis_core::{LeadSummarizer, Pipeline, RawDocument, SummaryLevel};

    #[test]
    fn test_document_sections() {
        let buffer = SharedBuffer::default();
        let mut formatter = MarkdownFormatter::new(buffer.clone());
        formatter
            .format_document(Path::new("book.txt"), &prepared())
            .unwrap();
        formatter.finish().unwrap();

        let output = buffer.contents();
        assert!(output.starts_with("# book.txt\n\n- **Language:** en\n"));
        assert!(output.contains("## Chunk 1 (50 words)"));
        assert!(output.contains("## Chunk 3 (40 words)"));
        assert!(!output.contains("## Cleaned text"));
        assert!(output.ends_with("---\n*Total files: 1*\n"));
    }

    #[test]
    fn test_report_section() {
        let report = Pipeline::new()
            .summarize(
                &RawDocument::from_text(sample_text()),
                &LeadSummarizer::new(1),
                SummaryLevel::Short,
            )
            .unwrap();

        let buffer = SharedBuffer::default();
        let mut formatter = MarkdownFormatter::new(buffer.clone());
        formatter
            .format_report(Path::new("book.txt"), &report)
            .unwrap();

        let output = buffer.contents();
        assert!(output.contains("## Summary (short)"));
        assert!(output.contains("**Keywords:** "));
        assert!(output.contains("from 1 chunks*"));
    }
}
