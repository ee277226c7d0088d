//! Error types for the preparation pipeline

use crate::summarizer::SummarizerError;
use thiserror::Error;

/// Errors surfaced to callers of the pipeline
///
/// Stage-local problems (a cleaning heuristic failing, language detection
/// finding no signal) are recovered inside their modules and never appear here.
#[derive(Error, Debug)]
pub enum PrecisError {
    /// Raw input has fewer words than the summarization minimum
    #[error("input too short for summarization: {word_count} words (minimum {minimum})")]
    InputTooShort {
        /// Whitespace-separated words found in the raw input
        word_count: usize,
        /// Configured minimum
        minimum: usize,
    },

    /// Chunk size must be a positive number of words
    #[error("invalid chunk size {0}: chunk size must be greater than 0")]
    InvalidChunkSize(usize),

    /// Invalid pipeline configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Segmentation rules could not be parsed or validated
    #[error("segmentation rules error: {0}")]
    Rules(String),

    /// The summarizer failed for one chunk
    #[error("summarization failed for chunk {chunk_id}: {source}")]
    ChunkSummary {
        /// Chunk that could not be summarized
        chunk_id: usize,
        /// Underlying summarizer failure
        #[source]
        source: SummarizerError,
    },

    /// I/O error while reading a document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PrecisError>;
