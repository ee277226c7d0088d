//! CLI command implementations

use crate::config::CliConfig;
use crate::input::resolve_patterns;
use crate::output::{create_formatter, OutputFormat, OutputFormatter};
use crate::progress::ProgressReporter;
use crate::rules_source::RulesSource;
use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use precis_core::{ChunkStrategy, Pipeline, PipelineConfig};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub mod generate_config;
pub mod prepare;
pub mod stats;
pub mod summarize;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Clean and chunk documents for summarization
    Prepare(prepare::PrepareArgs),

    /// Clean, chunk and summarize documents with the built-in lead summarizer
    Summarize(summarize::SummarizeArgs),

    /// Print statistics of the cleaned text
    Stats(stats::StatsArgs),

    /// Write the default configuration file
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Prepare(args) => args.execute(),
            Commands::Summarize(args) => args.execute(),
            Commands::Stats(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

/// Input, output and logging arguments shared by the document commands
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: `output.default_format` from the config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress logging and progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Noise-removal and segmentation arguments
#[derive(Debug, Args, Default)]
pub struct CleaningArgs {
    /// Keep a trailing References / Bibliography section
    #[arg(long)]
    pub keep_references: bool,

    /// Keep bracketed and parenthetical citations
    #[arg(long)]
    pub keep_citations: bool,

    /// Keep numbered footnote lines
    #[arg(long)]
    pub keep_footnotes: bool,

    /// Keep lines holding only a page number
    #[arg(long)]
    pub keep_page_numbers: bool,

    /// Remove all punctuation
    #[arg(long)]
    pub strip_punctuation: bool,

    /// Segmentation rules file (TOML) replacing the built-in English rules
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,
}

impl CleaningArgs {
    /// Switch off the stages the flags ask to keep
    pub fn apply(&self, config: &mut PipelineConfig) {
        let cleaning = &mut config.cleaning;
        if self.keep_references {
            cleaning.remove_references = false;
        }
        if self.keep_citations {
            cleaning.remove_citations = false;
        }
        if self.keep_footnotes {
            cleaning.remove_footnotes = false;
        }
        if self.keep_page_numbers {
            cleaning.remove_page_numbers = false;
        }
        if self.strip_punctuation {
            cleaning.keep_punctuation = false;
        }
    }

    /// Build a pipeline from `config` with the selected rules
    pub fn build_pipeline(&self, config: PipelineConfig) -> Result<Pipeline> {
        let source = RulesSource::from_arg(self.rules.as_ref());
        log::info!("Segmentation rules: {}", source.display_name());

        let pipeline = Pipeline::builder()
            .config(config)
            .rules(source.load()?)
            .build()
            .context("Invalid pipeline settings")?;
        Ok(pipeline)
    }
}

/// Chunking arguments
#[derive(Debug, Args, Default)]
pub struct ChunkingArgs {
    /// Maximum words per chunk
    #[arg(long, value_name = "WORDS")]
    pub chunk_size: Option<usize>,

    /// Words shared between consecutive chunks (negative values become 0)
    #[arg(long, value_name = "WORDS", allow_negative_numbers = true)]
    pub overlap: Option<i64>,

    /// Chunk boundary strategy
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
}

impl ChunkingArgs {
    /// Override configured chunking values with the given flags
    pub fn apply(&self, config: &mut PipelineConfig) {
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
        if let Some(overlap) = self.overlap {
            config.overlap = overlap_words(overlap);
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy.into();
        }
    }
}

/// Chunk strategies accepted by `--strategy`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Word windows of exactly `--chunk-size` words
    Fixed,
    /// Whole sentences packed up to `--chunk-size` words
    Sentences,
}

impl From<StrategyArg> for ChunkStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Fixed => ChunkStrategy::FixedWindow,
            StrategyArg::Sentences => ChunkStrategy::SentencePacking,
        }
    }
}

/// Clamp a requested overlap to a word count
fn overlap_words(requested: i64) -> usize {
    if requested < 0 {
        log::warn!("negative overlap {requested} clamped to 0");
        return 0;
    }
    usize::try_from(requested).unwrap_or(usize::MAX)
}

/// Initialize logging based on verbosity level
///
/// `RUST_LOG` takes precedence over `-v`.
pub fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Ignore a second installation, e.g. from tests
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}

/// Size the global rayon pool; 0 means one thread per CPU
pub fn configure_thread_pool(worker_threads: usize) {
    let threads = if worker_threads == 0 {
        num_cpus::get()
    } else {
        worker_threads
    };

    match rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
    {
        Ok(()) => log::debug!("rayon pool sized to {threads} threads"),
        Err(e) => log::debug!("rayon pool already initialized: {e}"),
    }
}

/// One command run over a set of input files
pub struct Session {
    /// Configuration file contents, or defaults
    pub config: CliConfig,
    files: Vec<PathBuf>,
    format: OutputFormat,
    output: Option<PathBuf>,
    quiet: bool,
}

impl Session {
    /// Install logging, load the configuration and resolve the inputs
    pub fn start(args: &InputArgs) -> Result<Self> {
        init_logging(args.verbose, args.quiet);
        log::debug!("Arguments: {:?}", args);

        let config = match &args.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };
        configure_thread_pool(config.performance.worker_threads);

        let files = resolve_patterns(&args.input)?;
        log::info!("Processing {} file(s)", files.len());

        Ok(Self {
            format: OutputFormat::resolve(args.format, &config.output),
            config,
            files,
            output: args.output.clone(),
            quiet: args.quiet,
        })
    }

    /// Call `handle` for every input file, then finish the output
    pub fn run<F>(self, mut handle: F) -> Result<()>
    where
        F: FnMut(&Path, &mut dyn OutputFormatter) -> Result<()>,
    {
        let writer = open_output(self.output.as_deref())?;
        let mut formatter = create_formatter(self.format, writer, &self.config.output);

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(self.files.len() as u64);

        for path in &self.files {
            handle(path, formatter.as_mut())?;
            progress.file_completed(&path.display().to_string());
        }

        progress.finish();
        formatter.finish()
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write + Send + Sync>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}
