// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
//   tokenizer_store.rs — resolves a pretrained tokenizer (local
//                        file, directory, or Hugging Face hub),
//                        configures fixed-length padding and
//                        truncation, and exposes it as a
//                        TextEncoder.
//
// Reference: Rust Book §7 (Modules)

/// Tokenizer loading and configuration
pub mod tokenizer_store;
