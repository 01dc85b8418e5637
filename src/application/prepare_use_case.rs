// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Runs the full preprocessing pipeline in order:
//
//   Step 1: Load the CSV corpus          (Layer 4 - data)
//   Step 2: Normalise tweets             (Layer 4 - data)
//   Step 3: Split train / test           (Layer 4 - data)
//   Step 4: Resolve the tokenizer        (Layer 6 - infra)
//   Step 5: Build datasets + providers   (Layer 4 - data)
//   Step 6: Pull one pass of each split  (Layer 4 - data)
//
// Step 6 encodes every record once, so a tokenizer failure
// surfaces here instead of in the middle of a training run.
//
// Reference: Rust Book §13 (Iterators and Closures)

use std::{fs, path::Path};

use anyhow::{Context, Result};
use burn::prelude::Backend;
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::{RecordDataset, DEFAULT_MAX_LENGTH},
    loader::{ColumnConfig, CsvLoader},
    normalizer::Normalizer,
    provider::{BatchProvider, DEFAULT_BATCH_SIZE},
    splitter::{Splitter, DEFAULT_SEED, DEFAULT_TEST_FRACTION},
};
use crate::domain::{
    record::{RecordSet, SplitResult},
    traits::{RecordSource, TextEncoder},
};
use crate::infra::tokenizer_store::{TokenizerStore, DEFAULT_TOKENIZER};

/// CPU backend the CLI builds batches on
pub type PrepBackend = burn::backend::NdArray<f32>;

// ─── Pipeline Configuration ──────────────────────────────────────────────────
// Every knob of the pipeline. Each component receives only its
// own part: the loader the path and columns, the splitter the
// fraction and seed, the datasets the tokenizer and max length,
// the providers the batch size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub data_path:     String,
    pub columns:       ColumnConfig,
    pub test_fraction: f64,
    pub seed:          u64,
    pub tokenizer:     String,
    pub max_length:    usize,
    pub batch_size:    usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_path:     "data/processed/twitter-financial-news-sentiment/samples/sample1.csv".to_string(),
            columns:       ColumnConfig::default(),
            test_fraction: DEFAULT_TEST_FRACTION,
            seed:          DEFAULT_SEED,
            tokenizer:     DEFAULT_TOKENIZER.to_string(),
            max_length:    DEFAULT_MAX_LENGTH,
            batch_size:    DEFAULT_BATCH_SIZE,
        }
    }
}

impl PipelineConfig {
    /// Read a configuration from JSON. Missing fields take their
    /// default values.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid config JSON in '{}'", path.display()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ─── Summary ──────────────────────────────────────────────────────────────────
/// What one prepare run produced, per split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSummary {
    pub records:     usize,
    pub with_source: usize,
    pub batches:     usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepareSummary {
    pub total: usize,
    pub train: SplitSummary,
    pub test:  SplitSummary,
}

/// Train and test providers built from one split.
pub struct Providers<B: Backend, E> {
    pub train: BatchProvider<B, E>,
    pub test:  BatchProvider<B, E>,
}

// ─── PrepareUseCase ───────────────────────────────────────────────────────────
pub struct PrepareUseCase {
    config: PipelineConfig,
}

impl PrepareUseCase {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Steps 1–3: load, normalise and split.
    pub fn load_and_split(&self) -> Result<SplitResult> {
        let cfg = &self.config;

        let splitter = Splitter::new(cfg.test_fraction, cfg.seed)?;

        tracing::info!("Loading corpus from '{}'", cfg.data_path);
        let loader = CsvLoader::new(&cfg.data_path, cfg.columns.clone());
        let raw    = loader.load_all().context("Failed to load corpus")?;

        self.normalize_and_split(&raw, &splitter)
    }

    fn normalize_and_split(&self, raw: &RecordSet, splitter: &Splitter) -> Result<SplitResult> {
        let normalized = Normalizer::new().normalize(raw);
        tracing::info!(
            "Normalised {} records ({} with source links)",
            normalized.len(),
            normalized.source_count()
        );

        let split = splitter.split(&normalized).context("Failed to split corpus")?;
        tracing::info!(
            "Split: {} train, {} test",
            split.train.len(),
            split.test.len()
        );
        Ok(split)
    }

    /// Step 5: one dataset + provider per split. Each dataset
    /// gets its own copy of the encoder.
    pub fn build_providers<B: Backend, E: TextEncoder + Clone>(
        &self,
        split:   SplitResult,
        encoder: E,
        device:  B::Device,
    ) -> Result<Providers<B, E>> {
        let cfg = &self.config;

        let train_ds = RecordDataset::new(split.train, encoder.clone(), cfg.max_length)?;
        let test_ds  = RecordDataset::new(split.test, encoder, cfg.max_length)?;

        let train = BatchProvider::new(train_ds, cfg.batch_size, false, device.clone(), cfg.seed)?;
        let test  = BatchProvider::new(test_ds, cfg.batch_size, true, device, cfg.seed)?;

        Ok(Providers { train, test })
    }

    /// Run every step and report what was produced.
    pub fn execute(&self) -> Result<PrepareSummary> {
        let split = self.load_and_split()?;
        let total = split.train.len() + split.test.len();

        let encoder = TokenizerStore::new(&self.config.tokenizer)
            .load(self.config.max_length)
            .context("Failed to load tokenizer")?;

        let providers = self.build_providers::<PrepBackend, _>(split, encoder, Default::default())?;
        summarize(total, providers)
    }
}

/// Step 6: pull one full pass from each provider.
pub fn summarize<B: Backend, E: TextEncoder>(
    total:         usize,
    mut providers: Providers<B, E>,
) -> Result<PrepareSummary> {
    let train = drain(&mut providers.train, "train")?;
    let test  = drain(&mut providers.test, "test")?;
    Ok(PrepareSummary { total, train, test })
}

fn drain<B: Backend, E: TextEncoder>(
    provider: &mut BatchProvider<B, E>,
    name:     &str,
) -> Result<SplitSummary> {
    let mut batches = 0usize;
    for batch in provider.iter() {
        batch.with_context(|| format!("Failed to encode {name} batch {}", batches + 1))?;
        batches += 1;
    }

    let records = provider.dataset().records();
    if records.is_empty() {
        tracing::warn!("The {} split is empty", name);
    }
    tracing::debug!("Pulled {} {} batches", batches, name);

    Ok(SplitSummary {
        records:     records.len(),
        with_source: records.source_count(),
        batches,
    })
}
