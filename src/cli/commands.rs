// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `prepare` and `config`, and the
// flags they share.
//
// Every flag is optional: the effective configuration starts
// from the defaults (or from --config FILE) and each flag given
// on the command line overrides one field.
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::application::prepare_use_case::PipelineConfig;

/// The top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load, normalise, split and batch the corpus, then print a summary
    Prepare(PipelineArgs),

    /// Print the effective configuration as JSON
    Config(PipelineArgs),
}

/// Pipeline settings shared by both subcommands.
#[derive(Args, Debug, Default)]
pub struct PipelineArgs {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// CSV file with the labelled tweets
    #[arg(long)]
    pub data_path: Option<String>,

    /// Name of the text column
    #[arg(long)]
    pub text_column: Option<String>,

    /// Name of the label column
    #[arg(long)]
    pub label_column: Option<String>,

    /// Share of records assigned to the test split, in (0, 1)
    #[arg(long)]
    pub test_fraction: Option<f64>,

    /// Seed for the split and for training-batch shuffles
    #[arg(long)]
    pub seed: Option<u64>,

    /// Tokenizer: hub id, tokenizer.json path, or directory
    #[arg(long)]
    pub tokenizer: Option<String>,

    /// Tokens per encoded tweet (pad/truncate to this length)
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Tweets per batch
    #[arg(long)]
    pub batch_size: Option<usize>,
}

impl PipelineArgs {
    /// Build the effective PipelineConfig: defaults or --config
    /// file first, then every flag that was given.
    pub fn into_config(self) -> Result<PipelineConfig> {
        let mut cfg = match &self.config {
            Some(path) => PipelineConfig::load_json(path)?,
            None       => PipelineConfig::default(),
        };

        if let Some(v) = self.data_path     { cfg.data_path     = v; }
        if let Some(v) = self.text_column   { cfg.columns.text  = v; }
        if let Some(v) = self.label_column  { cfg.columns.label = v; }
        if let Some(v) = self.test_fraction { cfg.test_fraction = v; }
        if let Some(v) = self.seed          { cfg.seed          = v; }
        if let Some(v) = self.tokenizer     { cfg.tokenizer     = v; }
        if let Some(v) = self.max_length    { cfg.max_length    = v; }
        if let Some(v) = self.batch_size    { cfg.batch_size    = v; }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_gives_defaults() {
        let cfg = PipelineArgs::default().into_config().unwrap();
        assert_eq!(cfg, PipelineConfig::default());
    }

    #[test]
    fn test_flags_override_fields() {
        let args = PipelineArgs {
            text_column: Some("tweet".into()),
            batch_size:  Some(16),
            seed:        Some(7),
            ..Default::default()
        };
        let cfg = args.into_config().unwrap();
        assert_eq!(cfg.columns.text, "tweet");
        assert_eq!(cfg.columns.label, "label");
        assert_eq!(cfg.batch_size, 16);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.max_length, 32);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = PipelineArgs {
            config: Some(PathBuf::from("/no/such/config.json")),
            ..Default::default()
        };
        assert!(args.into_config().is_err());
    }
}
