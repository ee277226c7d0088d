//! Pipeline configuration

use crate::chunker::ChunkStrategy;
use crate::cleaning::CleaningOptions;
use crate::error::{PrecisError, Result};
use serde::{Deserialize, Serialize};

/// Default configuration constants
pub mod defaults {
    /// Maximum words per chunk
    pub const CHUNK_SIZE: usize = 1200;

    /// Words shared between consecutive chunks
    pub const OVERLAP: usize = 200;

    /// Raw documents shorter than this are rejected
    pub const MIN_WORDS: usize = 100;

    /// Keywords in the final summary
    pub const KEYWORD_COUNT: usize = crate::postprocess::DEFAULT_KEYWORD_COUNT;
}

/// Settings for one pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum words per chunk, must be positive
    pub chunk_size: usize,
    /// Requested overlap in words; clamped to `chunk_size / 4` when not
    /// smaller than `chunk_size`
    pub overlap: usize,
    /// Chunk boundary strategy
    pub strategy: ChunkStrategy,
    /// Minimum raw word count for summarization
    pub min_words: usize,
    /// Keywords extracted by the post-processor
    pub keyword_count: usize,
    /// Summarize chunks concurrently when the `parallel` feature is enabled
    pub parallel: bool,
    /// Noise-removal switches
    pub cleaning: CleaningOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: defaults::CHUNK_SIZE,
            overlap: defaults::OVERLAP,
            strategy: ChunkStrategy::default(),
            min_words: defaults::MIN_WORDS,
            keyword_count: defaults::KEYWORD_COUNT,
            parallel: true,
            cleaning: CleaningOptions::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse a TOML document; missing fields take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| PrecisError::Config(format!("failed to parse configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| PrecisError::Config(format!("failed to serialize configuration: {e}")))
    }

    /// Check values that cannot be clamped
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(PrecisError::InvalidChunkSize(self.chunk_size));
        }
        Ok(())
    }
}
