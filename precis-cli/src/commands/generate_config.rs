//! Generate config command implementation

use crate::config::CliConfig;
use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

const HEADER: &str = "\
# precis configuration
#
# Pass with: precis prepare -i book.txt --config <this file>
# Command-line flags override the values below.

";

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        let template = self.generate_template()?;
        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("Configuration written to {}", self.output.display());
        Ok(())
    }

    /// Default configuration as a commented TOML document
    fn generate_template(&self) -> Result<String> {
        Ok(format!("{HEADER}{}", CliConfig::default().to_toml_string()?))
    }
}
