//! Overlapping chunking for model input windows
//!
//! Two strategies are available. [`ChunkStrategy::FixedWindow`] (the
//! default) slides a window of `chunk_size` words over the text, advancing
//! by `chunk_size - overlap`. [`ChunkStrategy::SentencePacking`] packs whole
//! sentences and seeds each new chunk with trailing sentences of the previous
//! one.
//!
//! Both strategies are lossless in word content: every chunk records how many
//! of its leading words repeat the previous chunk, and the remaining words of
//! all chunks, read in order, are exactly the words of the input.

use crate::error::{PrecisError, Result};
use crate::segment::{SegmentationRules, Segmenter};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How chunk boundaries are chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChunkStrategy {
    /// Fixed word windows; boundaries may fall mid-sentence
    #[default]
    FixedWindow,
    /// Whole sentences; only sentences longer than a chunk are split
    SentencePacking,
}

impl FromStr for ChunkStrategy {
    type Err = PrecisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fixed" | "fixed-window" | "words" => Ok(Self::FixedWindow),
            "sentences" | "sentence-packing" => Ok(Self::SentencePacking),
            other => Err(PrecisError::Config(format!(
                "unknown chunk strategy '{other}' (expected 'fixed' or 'sentences')"
            ))),
        }
    }
}

impl fmt::Display for ChunkStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FixedWindow => write!(f, "fixed-window"),
            Self::SentencePacking => write!(f, "sentence-packing"),
        }
    }
}

/// A span of the document sized for the summarizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// 1-based position in the chunk sequence
    pub chunk_id: usize,
    /// Chunk words joined by single spaces
    pub text: String,
    /// Number of words in `text`
    pub word_count: usize,
    /// Index of the first word in the document word sequence
    pub start_word: usize,
    /// Leading words repeated from the previous chunk
    pub overlap_words: usize,
}

impl Chunk {
    /// Words not shared with the previous chunk
    pub fn unique_words(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace().skip(self.overlap_words)
    }
}

/// Validated chunking parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChunkPolicy {
    chunk_size: usize,
    overlap: usize,
    strategy: ChunkStrategy,
}

impl ChunkPolicy {
    /// Validate `chunk_size` and clamp `overlap`
    ///
    /// A zero chunk size is rejected. An overlap that is not smaller than the
    /// chunk size is replaced by `chunk_size / 4`.
    pub fn new(chunk_size: usize, overlap: usize, strategy: ChunkStrategy) -> Result<Self> {
        if chunk_size == 0 {
            return Err(PrecisError::InvalidChunkSize(chunk_size));
        }

        let overlap = if overlap >= chunk_size {
            let clamped = chunk_size / 4;
            debug!("overlap {overlap} >= chunk size {chunk_size}, clamped to {clamped}");
            clamped
        } else {
            overlap
        };

        Ok(Self {
            chunk_size,
            overlap,
            strategy,
        })
    }

    /// Maximum words per chunk
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Effective overlap, always smaller than the chunk size
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Boundary strategy
    pub fn strategy(&self) -> ChunkStrategy {
        self.strategy
    }
}

/// Splits text into chunks according to a [`ChunkPolicy`]
#[derive(Debug, Clone)]
pub struct Chunker<'r> {
    policy: ChunkPolicy,
    rules: &'r SegmentationRules,
}

impl Chunker<'static> {
    /// Chunker using the embedded English rules for sentence packing
    pub fn new(policy: ChunkPolicy) -> Self {
        Self {
            policy,
            rules: SegmentationRules::english(),
        }
    }
}

impl<'r> Chunker<'r> {
    /// Chunker using custom segmentation rules
    pub fn with_rules(policy: ChunkPolicy, rules: &'r SegmentationRules) -> Self {
        Self { policy, rules }
    }

    /// The policy this chunker applies
    pub fn policy(&self) -> &ChunkPolicy {
        &self.policy
    }

    /// Chunk `text`; empty text yields no chunks
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let chunks = match self.policy.strategy {
            ChunkStrategy::FixedWindow => self.fixed_windows(text),
            ChunkStrategy::SentencePacking => self.sentence_packing(text),
        };
        debug!(
            "chunked {} words into {} chunk(s) ({}, size {}, overlap {})",
            text.split_whitespace().count(),
            chunks.len(),
            self.policy.strategy,
            self.policy.chunk_size,
            self.policy.overlap
        );
        chunks
    }

    fn fixed_windows(&self, text: &str) -> Vec<Chunk> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let step = self.policy.chunk_size - self.policy.overlap;
        let mut chunks = Vec::new();
        let mut start = 0usize;
        let mut prev_end = 0usize;

        while start < words.len() {
            let end = (start + self.policy.chunk_size).min(words.len());
            chunks.push(make_chunk(
                chunks.len() + 1,
                &words[start..end],
                start,
                prev_end.saturating_sub(start),
            ));
            if end == words.len() {
                break;
            }
            prev_end = end;
            start += step;
        }

        chunks
    }

    fn sentence_packing(&self, text: &str) -> Vec<Chunk> {
        let chunk_size = self.policy.chunk_size;

        // Units are sentences, with oversized sentences split into pieces
        let mut units: Vec<Vec<&str>> = Vec::new();
        for sentence in Segmenter::new(text, self.rules) {
            let words: Vec<&str> = sentence.split_whitespace().collect();
            units.extend(words.chunks(chunk_size).map(|piece| piece.to_vec()));
        }
        let mut unit_starts = Vec::with_capacity(units.len());
        let mut offset = 0;
        for unit in &units {
            unit_starts.push(offset);
            offset += unit.len();
        }

        let mut chunks = Vec::new();
        let mut current: Vec<usize> = Vec::new();
        let mut current_words = 0;
        let mut seed_count = 0;

        for (index, unit) in units.iter().enumerate() {
            if current_words + unit.len() > chunk_size && current.len() > seed_count {
                chunks.push(pack(&units, &unit_starts, &current, seed_count, chunks.len() + 1));

                let mut seeds: Vec<usize> = Vec::new();
                let mut seed_words = 0;
                for &prev in current.iter().rev() {
                    if seed_words >= self.policy.overlap {
                        break;
                    }
                    seeds.push(prev);
                    seed_words += units[prev].len();
                }
                seeds.reverse();
                while seed_words + unit.len() > chunk_size && !seeds.is_empty() {
                    seed_words -= units[seeds.remove(0)].len();
                }

                seed_count = seeds.len();
                current = seeds;
                current_words = seed_words;
            }
            current.push(index);
            current_words += unit.len();
        }

        if current.len() > seed_count {
            chunks.push(pack(&units, &unit_starts, &current, seed_count, chunks.len() + 1));
        }

        chunks
    }
}

fn make_chunk(chunk_id: usize, words: &[&str], start_word: usize, overlap_words: usize) -> Chunk {
    Chunk {
        chunk_id,
        text: words.join(" "),
        word_count: words.len(),
        start_word,
        overlap_words,
    }
}

fn pack(
    units: &[Vec<&str>],
    unit_starts: &[usize],
    members: &[usize],
    seed_count: usize,
    chunk_id: usize,
) -> Chunk {
    let words: Vec<&str> = members
        .iter()
        .flat_map(|&unit| units[unit].iter().copied())
        .collect();
    let overlap_words = members[..seed_count]
        .iter()
        .map(|&unit| units[unit].len())
        .sum();
    make_chunk(chunk_id, &words, unit_starts[members[0]], overlap_words)
}

/// Chunk `text` into fixed windows of `chunk_size` words
///
/// Fails only when `chunk_size` is zero; an overlap that is not smaller than
/// the chunk size is clamped to `chunk_size / 4`.
pub fn chunk(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<Chunk>> {
    let policy = ChunkPolicy::new(chunk_size, overlap, ChunkStrategy::FixedWindow)?;
    Ok(Chunker::new(policy).chunk(text))
}
