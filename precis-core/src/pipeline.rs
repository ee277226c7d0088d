//! Pipeline orchestration
//!
//! [`Pipeline::prepare`] runs normalization, noise removal, language
//! detection, statistics and chunking over a raw document.
//! [`Pipeline::summarize`] additionally sends every chunk through a
//! [`Summarizer`] and post-processes the joined chunk summaries.
//!
//! Either call returns a complete result or an error; nothing is partially
//! populated.

use crate::chunker::{Chunk, ChunkPolicy, ChunkStrategy, Chunker};
use crate::cleaning::{remove_noise, CleaningOptions};
use crate::config::PipelineConfig;
use crate::document::RawDocument;
use crate::error::{PrecisError, Result};
use crate::language::{detect_or_unknown, LanguageDetector, LanguageTag, StopwordDetector};
use crate::normalize::normalize;
use crate::postprocess::{FinalSummary, PostProcessor, SummaryLevel};
use crate::segment::SegmentationRules;
use crate::stats::{compute_stats_with, round2, TextStats};
use crate::summarizer::{summarize_chunks, ChunkSummary, Summarizer};
use log::{debug, info};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Everything the summarization stage needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedDocument {
    /// Normalized text with noise removed
    pub cleaned_text: String,
    /// Detected language, or `"unknown"`
    pub language: LanguageTag,
    /// Statistics of `cleaned_text`
    pub stats: TextStats,
    /// Chunks of `cleaned_text` in document order
    pub chunks: Vec<Chunk>,
    /// Effective chunking parameters after clamping
    pub policy: ChunkPolicy,
}

/// Outcome of a full summarization run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    /// The prepared document the summaries were produced from
    pub document: PreparedDocument,
    /// One summary per chunk, in chunk order
    pub chunk_summaries: Vec<ChunkSummary>,
    /// Post-processed final summary
    pub summary: FinalSummary,
    /// Wall-clock duration of the run, rounded to two decimals
    pub processing_time_secs: f64,
}

/// Configured preparation pipeline
#[derive(Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    rules: Arc<SegmentationRules>,
    detector: Arc<dyn LanguageDetector>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("rules", &self.rules.code())
            .finish_non_exhaustive()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Pipeline with default configuration, English rules and the stopword detector
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            rules: Arc::new(SegmentationRules::english().clone()),
            detector: Arc::new(StopwordDetector::new()),
        }
    }

    /// Create a pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Pipeline from a validated configuration
    pub fn with_config(config: PipelineConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Current configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Segmentation rules in use
    pub fn rules(&self) -> &SegmentationRules {
        &self.rules
    }

    /// Clean, analyze and chunk a raw document
    ///
    /// Fails with [`PrecisError::InvalidChunkSize`] for a zero chunk size and
    /// with [`PrecisError::InputTooShort`] when the raw text has fewer words
    /// than the configured minimum.
    pub fn prepare(&self, raw: &RawDocument) -> Result<PreparedDocument> {
        let started = Instant::now();
        let config = &self.config;
        let policy = ChunkPolicy::new(config.chunk_size, config.overlap, config.strategy)?;

        let word_count = raw.word_count();
        if word_count < config.min_words {
            return Err(PrecisError::InputTooShort {
                word_count,
                minimum: config.min_words,
            });
        }

        let normalized = normalize(raw.text());
        debug!(
            "normalized {} document: {} -> {} bytes",
            raw.format(),
            raw.text().len(),
            normalized.len()
        );
        let cleaned_text = remove_noise(&normalized, &config.cleaning);
        debug!("noise removal: {} -> {} bytes", normalized.len(), cleaned_text.len());

        let language = detect_or_unknown(self.detector.as_ref(), &cleaned_text);
        let stats = compute_stats_with(&cleaned_text, &self.rules);
        let chunks = Chunker::with_rules(policy, &self.rules).chunk(&cleaned_text);

        info!(
            "prepared document: {} words, {} sentences, {} chunk(s), language {} in {:.2?}",
            stats.word_count,
            stats.sentence_count,
            chunks.len(),
            language,
            started.elapsed()
        );

        Ok(PreparedDocument {
            cleaned_text,
            language,
            stats,
            chunks,
            policy,
        })
    }

    /// Prepare a document, summarize every chunk and post-process the result
    ///
    /// Chunk summaries are joined with single spaces in chunk order. The
    /// first failing chunk aborts the run.
    pub fn summarize(
        &self,
        raw: &RawDocument,
        summarizer: &dyn Summarizer,
        level: SummaryLevel,
    ) -> Result<SummaryReport> {
        let started = Instant::now();
        let document = self.prepare(raw)?;
        let chunk_summaries = summarize_chunks(&document.chunks, summarizer, self.config.parallel)?;

        let combined = chunk_summaries
            .iter()
            .map(|summary| summary.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let summary = self.post_process(&combined, level);
        let processing_time_secs = round2(started.elapsed().as_secs_f64());

        info!(
            "summarized {} chunk(s) into {} words ({level}) in {processing_time_secs}s",
            chunk_summaries.len(),
            summary.word_count
        );

        Ok(SummaryReport {
            document,
            chunk_summaries,
            summary,
            processing_time_secs,
        })
    }

    /// Post-process combined chunk summaries with this pipeline's rules
    pub fn post_process(&self, text: &str, level: SummaryLevel) -> FinalSummary {
        PostProcessor::new(&self.rules)
            .keyword_count(self.config.keyword_count)
            .process(text, level)
    }
}

/// Fluent builder for [`Pipeline`]
#[derive(Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
    rules: Option<SegmentationRules>,
    detector: Option<Arc<dyn LanguageDetector>>,
}

impl PipelineBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Maximum words per chunk
    pub fn chunk_size(mut self, words: usize) -> Self {
        self.config.chunk_size = words;
        self
    }

    /// Words shared between consecutive chunks
    pub fn overlap(mut self, words: usize) -> Self {
        self.config.overlap = words;
        self
    }

    /// Chunk boundary strategy
    pub fn strategy(mut self, strategy: ChunkStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Minimum raw word count
    pub fn min_words(mut self, words: usize) -> Self {
        self.config.min_words = words;
        self
    }

    /// Keywords in the final summary
    pub fn keyword_count(mut self, count: usize) -> Self {
        self.config.keyword_count = count;
        self
    }

    /// Summarize chunks concurrently
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Noise-removal switches
    pub fn cleaning(mut self, options: CleaningOptions) -> Self {
        self.config.cleaning = options;
        self
    }

    /// Custom segmentation rules
    pub fn rules(mut self, rules: SegmentationRules) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Custom language detector
    pub fn detector(mut self, detector: impl LanguageDetector + 'static) -> Self {
        self.detector = Some(Arc::new(detector));
        self
    }

    /// Validate and build the pipeline
    pub fn build(self) -> Result<Pipeline> {
        self.config.validate()?;
        Ok(Pipeline {
            config: self.config,
            rules: Arc::new(
                self.rules
                    .unwrap_or_else(|| SegmentationRules::english().clone()),
            ),
            detector: self
                .detector
                .unwrap_or_else(|| Arc::new(StopwordDetector::new())),
        })
    }
}

/// Prepare raw text with the default minimum length and fixed-window chunking
pub fn prepare_for_summarization(
    text: &str,
    chunk_size: usize,
    overlap: usize,
    options: &CleaningOptions,
) -> Result<PreparedDocument> {
    Pipeline::builder()
        .chunk_size(chunk_size)
        .overlap(overlap)
        .cleaning(*options)
        .build()?
        .prepare(&RawDocument::from_text(text))
}
