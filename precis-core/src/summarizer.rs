//! Summarizer capability and per-chunk fan-out

use crate::chunker::Chunk;
use crate::error::{PrecisError, Result};
use crate::segment::{SegmentationRules, Segmenter};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Sentences kept by [`LeadSummarizer`] unless configured otherwise
pub const DEFAULT_LEAD_SENTENCES: usize = 3;

/// Failure reported by a summarizer for one input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummarizerError {
    /// The summarizer could not produce a summary
    #[error("summarizer failed: {0}")]
    Failed(String),

    /// The input had no content to summarize
    #[error("nothing to summarize")]
    EmptyInput,
}

/// Text summarization capability, typically backed by a model
///
/// Implementations must be shareable across threads: chunks may be
/// summarized concurrently.
pub trait Summarizer: Send + Sync {
    /// Summarize one chunk of text
    fn summarize(&self, text: &str) -> std::result::Result<String, SummarizerError>;

    /// Name used in log records
    fn name(&self) -> &str;
}

/// Extractive summarizer returning the first sentences of its input
#[derive(Debug, Clone)]
pub struct LeadSummarizer {
    sentences: usize,
    rules: &'static SegmentationRules,
}

impl Default for LeadSummarizer {
    fn default() -> Self {
        Self::new(DEFAULT_LEAD_SENTENCES)
    }
}

impl LeadSummarizer {
    /// Keep the first `sentences` sentences (at least one)
    pub fn new(sentences: usize) -> Self {
        Self {
            sentences: sentences.max(1),
            rules: SegmentationRules::english(),
        }
    }
}

impl Summarizer for LeadSummarizer {
    fn summarize(&self, text: &str) -> std::result::Result<String, SummarizerError> {
        let lead: Vec<&str> = Segmenter::new(text, self.rules)
            .take(self.sentences)
            .collect();
        if lead.is_empty() {
            return Err(SummarizerError::EmptyInput);
        }
        Ok(lead.join(" "))
    }

    fn name(&self) -> &str {
        "lead"
    }
}

/// Summary of one chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSummary {
    /// Chunk this summary belongs to
    pub chunk_id: usize,
    /// Summary text
    pub text: String,
}

/// Summarize every chunk, returning summaries in chunk order
///
/// With `parallel` set (and the `parallel` feature enabled) chunks are
/// dispatched concurrently. The first failure in chunk order aborts the
/// whole call.
pub fn summarize_chunks(
    chunks: &[Chunk],
    summarizer: &dyn Summarizer,
    parallel: bool,
) -> Result<Vec<ChunkSummary>> {
    let summarize_one = |chunk: &Chunk| {
        summarizer
            .summarize(&chunk.text)
            .map(|text| ChunkSummary {
                chunk_id: chunk.chunk_id,
                text,
            })
            .map_err(|source| PrecisError::ChunkSummary {
                chunk_id: chunk.chunk_id,
                source,
            })
    };

    debug!(
        "summarizing {} chunk(s) with '{}'{}",
        chunks.len(),
        summarizer.name(),
        if parallel { " in parallel" } else { "" }
    );

    #[cfg(feature = "parallel")]
    if parallel {
        // Collect every outcome first so the reported error is the earliest chunk's
        let outcomes: Vec<Result<ChunkSummary>> = chunks.par_iter().map(summarize_one).collect();
        return outcomes.into_iter().collect();
    }

    chunks.iter().map(summarize_one).collect()
}
