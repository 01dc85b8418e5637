// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing the corpus:
// records, aligned record sets, encoded items, the error
// taxonomy, and the collaborator traits.
//
// Rules for this layer:
//   - NO Burn framework types
//   - NO file I/O
//   - NO tokenizer internals
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Records, aligned record sets, split results
pub mod record;

// Tokenizer output and per-item encodings
pub mod encoded;

// PipelineError
pub mod error;

// RecordSource and TextEncoder
pub mod traits;
