// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The pipeline talks to its two external collaborators through
// these traits:
//   - RecordSource: wherever raw labelled tweets come from
//                   (CsvLoader reads a CSV file)
//   - TextEncoder:  the opaque text → fixed-length ids service
//                   (a Hugging Face tokenizer in production,
//                   anything else in tests)
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::{encoded::Encoding, error::PipelineError, record::RecordSet};

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Anything that can produce the raw record set.
///
/// Implementations:
///   - CsvLoader → reads `text` / `label` columns from a CSV file
pub trait RecordSource {
    /// Load every record. `has_source` is cleared on all of them.
    fn load_all(&self) -> Result<RecordSet, PipelineError>;
}

// ─── TextEncoder ──────────────────────────────────────────────────────────────
/// Turns one text into token ids plus an attention mask of
/// `max_length` entries, padding short input and truncating
/// long input.
///
/// Must be Send + Sync so a dataset holding it can be shared
/// read-only between threads.
pub trait TextEncoder: Send + Sync {
    fn encode(&self, text: &str, max_length: usize) -> Result<Encoding, PipelineError>;

    /// Id used to pad sequences shorter than max_length
    fn pad_id(&self) -> u32 {
        0
    }
}
