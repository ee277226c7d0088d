use anyhow::Result;
use clap::Parser;
use precis_cli::commands::Commands;

/// Clean, chunk and summarize long documents
#[derive(Debug, Parser)]
#[command(name = "precis", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
