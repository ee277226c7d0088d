//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use precis_core::{PreparedDocument, SummaryReport, TextStats};
use std::io::Write;
use std::path::Path;

/// Plain text formatter
pub struct TextFormatter<W: Write> {
    writer: W,
    include_cleaned_text: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            include_cleaned_text: false,
        }
    }

    /// Also print the cleaned text before the chunks
    pub fn include_cleaned_text(mut self, include: bool) -> Self {
        self.include_cleaned_text = include;
        self
    }

    fn write_stats(&mut self, stats: &TextStats) -> Result<()> {
        writeln!(
            self.writer,
            "Words: {} | Characters: {} | Sentences: {} | Avg sentence length: {} | Read time: {} min",
            stats.word_count,
            stats.char_count,
            stats.sentence_count,
            stats.avg_sentence_length,
            stats.estimated_read_time_minutes
        )?;
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_document(&mut self, source: &Path, document: &PreparedDocument) -> Result<()> {
        writeln!(self.writer, "== {} ==", source.display())?;
        writeln!(self.writer, "Language: {}", document.language)?;
        self.write_stats(&document.stats)?;
        let policy = &document.policy;
        writeln!(
            self.writer,
            "Chunks: {} ({}, size {}, overlap {})",
            document.chunks.len(),
            policy.strategy(),
            policy.chunk_size(),
            policy.overlap()
        )?;

        if self.include_cleaned_text {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", document.cleaned_text)?;
        }

        for chunk in &document.chunks {
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "--- Chunk {} ({} words, {} overlapping) ---",
                chunk.chunk_id, chunk.word_count, chunk.overlap_words
            )?;
            writeln!(self.writer, "{}", chunk.text)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn format_report(&mut self, source: &Path, report: &SummaryReport) -> Result<()> {
        let summary = &report.summary;
        writeln!(self.writer, "== {} ==", source.display())?;
        writeln!(
            self.writer,
            "Summary ({}, {} words):",
            summary.level, summary.word_count
        )?;
        writeln!(self.writer, "{}", summary.text)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Keywords: {}", summary.keywords.join(", "))?;
        writeln!(
            self.writer,
            "Chunks summarized: {}",
            report.chunk_summaries.len()
        )?;
        writeln!(self.writer, "Language: {}", report.document.language)?;
        writeln!(
            self.writer,
            "Processing time: {:.3}s",
            report.processing_time_secs
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn format_stats(&mut self, source: &Path, stats: &TextStats) -> Result<()> {
        writeln!(self.writer, "== {} ==", source.display())?;
        self.write_stats(stats)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
