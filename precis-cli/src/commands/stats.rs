//! Stats command implementation

use super::{CleaningArgs, InputArgs, Session};
use crate::input::FileReader;
use anyhow::Result;
use clap::Args;
use precis_core::{clean, compute_stats_with};

/// Arguments for the stats command
#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub cleaning: CleaningArgs,
}

impl StatsArgs {
    /// Print statistics of each cleaned input; short inputs are allowed
    pub fn execute(&self) -> Result<()> {
        let session = Session::start(&self.input)?;

        let mut config = session.config.pipeline.clone();
        self.cleaning.apply(&mut config);
        let pipeline = self.cleaning.build_pipeline(config)?;

        session.run(|path, formatter| {
            let raw = FileReader::read_document(path)?;
            let cleaned = clean(raw.text(), &pipeline.config().cleaning);
            let stats = compute_stats_with(&cleaned, pipeline.rules());
            formatter.format_stats(path, &stats)
        })
    }
}
