//! Output formatting module

use crate::config::OutputConfig;
use anyhow::Result;
use clap::ValueEnum;
use precis_core::{PreparedDocument, SummaryReport, TextStats};
use std::io::Write;
use std::path::Path;

/// Trait for output formatters
///
/// Each `format_*` call handles one input file; `finish` flushes anything
/// buffered across files.
pub trait OutputFormatter: Send + Sync {
    /// Output a prepared document
    fn format_document(&mut self, source: &Path, document: &PreparedDocument) -> Result<()>;

    /// Output a summarization report
    fn format_report(&mut self, source: &Path, report: &SummaryReport) -> Result<()>;

    /// Output text statistics
    fn format_stats(&mut self, source: &Path, stats: &TextStats) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON array with one entry per file
    Json,
    /// Markdown
    Markdown,
}

impl OutputFormat {
    /// Format from `--format`, else the configured default, else text
    pub fn resolve(flag: Option<OutputFormat>, config: &OutputConfig) -> Self {
        flag.unwrap_or_else(|| {
            <OutputFormat as ValueEnum>::from_str(&config.default_format, true).unwrap_or_else(
                |_| {
                    log::warn!(
                        "unknown default_format {:?} in config, using text",
                        config.default_format
                    );
                    OutputFormat::Text
                },
            )
        })
    }
}

/// Build the formatter for `format` writing to `writer`
pub fn create_formatter<W>(
    format: OutputFormat,
    writer: W,
    config: &OutputConfig,
) -> Box<dyn OutputFormatter>
where
    W: Write + Send + Sync + 'static,
{
    match format {
        OutputFormat::Text => Box::new(
            TextFormatter::new(writer).include_cleaned_text(config.include_cleaned_text),
        ),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer).pretty(config.pretty_json)),
        OutputFormat::Markdown => Box::new(
            MarkdownFormatter::new(writer).include_cleaned_text(config.include_cleaned_text),
        ),
    }
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;
