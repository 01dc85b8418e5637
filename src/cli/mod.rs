// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses command line arguments with clap and hands off to the
// application layer.
//
//   1. `prepare` — run the pipeline and print a summary
//   2. `config`  — print the effective configuration
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PipelineArgs};

#[derive(Parser, Debug)]
#[command(
    name = "tweet-prep",
    version = "0.1.0",
    about = "Normalise, split and batch labelled financial tweets for model training."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args) => run_prepare(args),
            Commands::Config(args)  => run_config(args),
        }
    }
}

fn run_prepare(args: PipelineArgs) -> Result<()> {
    use crate::application::prepare_use_case::PrepareUseCase;

    let config = args.into_config()?;
    tracing::info!("Preparing corpus '{}'", config.data_path);

    let summary = PrepareUseCase::new(config).execute()?;

    println!("Records: {}", summary.total);
    for (name, s) in [("train", &summary.train), ("test", &summary.test)] {
        println!(
            "  {:<5} {:>6} records, {:>6} with source link, {:>4} batches",
            name, s.records, s.with_source, s.batches
        );
    }
    Ok(())
}

fn run_config(args: PipelineArgs) -> Result<()> {
    let config = args.into_config()?;
    println!("{}", config.to_json()?);
    Ok(())
}
