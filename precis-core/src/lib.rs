//! Text preparation for chunked document summarization
//!
//! Extracted document text is noisy and far longer than a summarization
//! model's input window. This crate turns it into clean, overlapping chunks
//! and assembles the per-chunk summaries into a final summary.
//!
//! # Pipeline
//!
//! 1. [`normalize`]: NFKC, line endings and whitespace
//! 2. [`remove_noise`]: references, citations, footnotes, page numbers and
//!    control characters, switched by [`CleaningOptions`]
//! 3. language detection through a [`LanguageDetector`]
//! 4. [`segment`] and [`compute_stats`]
//! 5. [`chunk`] into word-bounded windows or sentence-packed chunks
//! 6. per-chunk [`Summarizer`] calls and [`post_process`]
//!
//! # Example
//!
//! ```rust
//! use precis_core::{prepare_for_summarization, CleaningOptions};
//!
//! let text = "The old mill stood by the river for many years. ".repeat(15);
//! let prepared = prepare_for_summarization(&text, 100, 20, &CleaningOptions::default())?;
//!
//! assert_eq!(prepared.stats.word_count, 150);
//! assert_eq!(prepared.chunks.len(), 2);
//! assert_eq!(prepared.chunks[1].overlap_words, 20);
//! # Ok::<(), precis_core::PrecisError>(())
//! ```

pub mod chunker;
pub mod cleaning;
pub mod config;
pub mod document;
pub mod error;
pub mod language;
pub mod normalize;
pub mod pipeline;
pub mod postprocess;
pub mod segment;
pub mod stats;
pub mod summarizer;

pub use chunker::{chunk, Chunk, ChunkPolicy, ChunkStrategy, Chunker};
pub use cleaning::{clean, remove_noise, CleaningOptions};
pub use config::{defaults, PipelineConfig};
pub use document::{RawDocument, SourceFormat};
pub use error::{PrecisError, Result};
pub use language::{
    detect_or_unknown, LanguageDetectionError, LanguageDetector, LanguageTag, StopwordDetector,
};
pub use normalize::normalize;
pub use pipeline::{
    prepare_for_summarization, Pipeline, PipelineBuilder, PreparedDocument, SummaryReport,
};
pub use postprocess::{post_process, FinalSummary, PostProcessor, SummaryLevel};
pub use segment::{segment, segment_with, SegmentationRules, Segmenter};
pub use stats::{compute_stats, compute_stats_with, TextStats};
pub use summarizer::{
    summarize_chunks, ChunkSummary, LeadSummarizer, Summarizer, SummarizerError,
};
