// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the data and infra layers to accomplish one
// goal: turn the raw corpus into train/test batch providers.
//
// Rules for this layer:
//   - No text cleaning or tokenisation logic here
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Rust Book §7 (Module System)

// Pipeline configuration and the prepare workflow
pub mod prepare_use_case;
