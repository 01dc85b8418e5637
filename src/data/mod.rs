// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the raw CSV corpus to tensor batches.
//
//   tweets.csv
//       │
//       ▼
//   CsvLoader       → reads text / label columns
//       │
//       ▼
//   Normalizer      → strips https links, sets has_source
//       │
//       ▼
//   Splitter        → seeded train / test partition
//       │
//       ▼
//   RecordDataset   → per-access tokenisation to fixed length
//       │
//       ▼
//   BatchProvider   → shuffled (train) or ordered (test) passes
//       │
//       ▼
//   TweetBatcher    → stacks items into Burn tensors
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Reads the labelled CSV corpus
pub mod loader;

/// Removes embedded links and derives has_source
pub mod normalizer;

/// Seeded train/test partition
pub mod splitter;

/// Indexable, lazily encoded view over one split
pub mod dataset;

/// Implements Burn's Batcher trait for encoded tweets
pub mod batcher;

/// Lazy, restartable batch passes over a dataset
pub mod provider;
