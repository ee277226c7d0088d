//! Prepare command implementation

use super::{ChunkingArgs, CleaningArgs, InputArgs, Session};
use crate::input::FileReader;
use crate::error::CliError;
use anyhow::Result;
use clap::Args;

/// Arguments for the prepare command
#[derive(Debug, Args)]
pub struct PrepareArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub chunking: ChunkingArgs,

    #[command(flatten)]
    pub cleaning: CleaningArgs,
}

impl PrepareArgs {
    /// Clean, analyze and chunk every input file
    pub fn execute(&self) -> Result<()> {
        let session = Session::start(&self.input)?;

        let mut config = session.config.pipeline.clone();
        self.chunking.apply(&mut config);
        self.cleaning.apply(&mut config);
        let pipeline = self.cleaning.build_pipeline(config)?;

        session.run(|path, formatter| {
            let raw = FileReader::read_document(path)?;
            let document = pipeline
                .prepare(&raw)
                .map_err(|e| CliError::ProcessingError(format!("{}: {e}", path.display())))?;
            formatter.format_document(path, &document)
        })
    }
}
