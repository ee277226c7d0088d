//! Summarize command implementation

use super::{ChunkingArgs, CleaningArgs, InputArgs, Session};
use crate::input::FileReader;
use crate::error::CliError;
use anyhow::Result;
use clap::Args;
use precis_core::{LeadSummarizer, Summarizer, SummaryLevel};

/// Arguments for the summarize command
#[derive(Debug, Args)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Summary length: short, medium or long
    #[arg(short, long, default_value = "medium", value_parser = parse_level)]
    pub level: SummaryLevel,

    /// Sentences kept from each chunk by the lead summarizer
    #[arg(long, value_name = "N", default_value_t = precis_core::summarizer::DEFAULT_LEAD_SENTENCES)]
    pub lead_sentences: usize,

    #[command(flatten)]
    pub chunking: ChunkingArgs,

    #[command(flatten)]
    pub cleaning: CleaningArgs,
}

fn parse_level(value: &str) -> Result<SummaryLevel, String> {
    value.parse().map_err(|e: precis_core::PrecisError| e.to_string())
}

impl SummarizeArgs {
    /// Summarize every input file
    pub fn execute(&self) -> Result<()> {
        let session = Session::start(&self.input)?;

        let mut config = session.config.pipeline.clone();
        self.chunking.apply(&mut config);
        self.cleaning.apply(&mut config);
        let pipeline = self.cleaning.build_pipeline(config)?;

        let summarizer = LeadSummarizer::new(self.lead_sentences);
        log::info!(
            "Summarizer: {} ({} sentences per chunk), level {}",
            summarizer.name(),
            self.lead_sentences,
            self.level
        );

        session.run(|path, formatter| {
            let raw = FileReader::read_document(path)?;
            let report = pipeline
                .summarize(&raw, &summarizer, self.level)
                .map_err(|e| CliError::ProcessingError(format!("{}: {e}", path.display())))?;
            formatter.format_report(path, &report)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("LONG").unwrap(), SummaryLevel::Long);
        let err = parse_level("tiny").unwrap_err();
        assert!(err.contains("unknown summary level"));
    }
}
