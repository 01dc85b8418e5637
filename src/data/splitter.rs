// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Partitions a normalised RecordSet into disjoint train and
// test subsets.
//
// Algorithm (seeded shuffle-and-cut):
//   1. indices = [0, 1, ..., N-1]
//   2. Fisher-Yates shuffle with StdRng::seed_from_u64(seed)
//   3. first n_test shuffled indices → test, the rest → train
//
//   n_test  = ceil(test_fraction * N)
//   n_train = N - n_test
//
// For fixed N, fraction and seed the partition is always the
// same. Both subsets keep the shuffled order.
//
// Reference: rand crate documentation (SeedableRng, SliceRandom)
//            Rust Book §8 (Vectors)

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::domain::{
    error::PipelineError,
    record::{RecordSet, SplitResult},
};

/// Default share of records assigned to the test subset
pub const DEFAULT_TEST_FRACTION: f64 = 0.33;

/// Default shuffle seed
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, Copy)]
pub struct Splitter {
    test_fraction: f64,
    seed:          u64,
}

impl Splitter {
    /// Create a splitter. `test_fraction` must lie strictly
    /// between 0 and 1.
    pub fn new(test_fraction: f64, seed: u64) -> Result<Self, PipelineError> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "test fraction must be in (0, 1), got {test_fraction}"
            )));
        }
        Ok(Self { test_fraction, seed })
    }

    pub fn test_fraction(&self) -> f64 {
        self.test_fraction
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of test records for a corpus of `total` records
    pub fn test_size(&self, total: usize) -> usize {
        ((total as f64) * self.test_fraction).ceil() as usize
    }

    /// Split `records` into train and test subsets.
    ///
    /// Fails with an input-shape error when there are fewer than
    /// two records or when either side would end up empty.
    pub fn split(&self, records: &RecordSet) -> Result<SplitResult, PipelineError> {
        let total = records.len();
        if total < 2 {
            return Err(PipelineError::InputShape(format!(
                "need at least 2 records to split, got {total}"
            )));
        }

        let n_test  = self.test_size(total);
        let n_train = total.saturating_sub(n_test);
        if n_test == 0 || n_train == 0 {
            return Err(PipelineError::InputShape(format!(
                "test fraction {} leaves an empty subset for {} records ({} train / {} test)",
                self.test_fraction, total, n_train, n_test
            )));
        }

        let mut indices: Vec<usize> = (0..total).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        indices.shuffle(&mut rng);

        let (test_idx, train_idx) = indices.split_at(n_test);
        let test  = records.select(test_idx)?;
        let train = records.select(train_idx)?;

        tracing::debug!(
            "Dataset split: {} training, {} test (seed {})",
            train.len(),
            test.len(),
            self.seed,
        );

        Ok(SplitResult { train, test })
    }
}

impl Default for Splitter {
    fn default() -> Self {
        Self {
            test_fraction: DEFAULT_TEST_FRACTION,
            seed:          DEFAULT_SEED,
        }
    }
}
