// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// Every fallible step of the preprocessing pipeline returns
// PipelineError. Nothing is caught and skipped: dropping a row
// would break the alignment of text/has_source/label columns.
//
// The application and CLI layers wrap these in anyhow::Error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Misaligned columns, too few records, or a split that
    /// would leave one side empty.
    #[error("input shape error: {0}")]
    InputShape(String),

    /// Dataset access past the last record.
    #[error("index {index} out of bounds for dataset of {len} records")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The tokenizer could not encode a text.
    #[error("encoding failed{}: {message}", .index.map(|i| format!(" for record {i}")).unwrap_or_default())]
    Encoding {
        index:   Option<usize>,
        message: String,
    },

    /// A configuration value is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The tokenizer could not be loaded or configured.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// The corpus file is missing a required column or similar.
    #[error("load error: {0}")]
    Load(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
