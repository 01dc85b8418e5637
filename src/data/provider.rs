// ============================================================
// Layer 4 — Batch Provider
// ============================================================
// Feeds a Record Dataset to a training or evaluation loop as a
// lazy sequence of TweetBatches.
//
//   training   (is_validation = false)
//       every call to iter() draws a fresh random order from the
//       provider's RNG, so consecutive passes differ
//   validation (is_validation = true)
//       natural index order, identical on every pass
//
// Batch sizes: batch_size for every batch, except the last one
// which holds the remaining N mod batch_size items.
//
// Items are encoded only when their batch is pulled. An encoding
// or index error is yielded in place of that batch; the caller
// decides whether to keep pulling.
//
// Reference: Burn Book §4 (DataLoader)
//            Rust Book §13 (Implementing the Iterator trait)

use burn::{data::dataloader::batcher::Batcher, prelude::*};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::data::{
    batcher::{TweetBatch, TweetBatcher},
    dataset::RecordDataset,
};
use crate::domain::{error::PipelineError, traits::TextEncoder};

/// Default number of items per batch
pub const DEFAULT_BATCH_SIZE: usize = 32;

pub struct BatchProvider<B: Backend, E> {
    dataset:       RecordDataset<E>,
    batcher:       TweetBatcher<B>,
    batch_size:    usize,
    is_validation: bool,
    rng:           StdRng,
}

impl<B: Backend, E: TextEncoder> BatchProvider<B, E> {
    /// Build a provider over `dataset`.
    ///
    /// `seed` drives the per-pass shuffles in training mode and
    /// is ignored in validation mode.
    pub fn new(
        dataset:       RecordDataset<E>,
        batch_size:    usize,
        is_validation: bool,
        device:        B::Device,
        seed:          u64,
    ) -> Result<Self, PipelineError> {
        if batch_size == 0 {
            return Err(PipelineError::InvalidConfig(
                "batch size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            dataset,
            batcher: TweetBatcher::new(device),
            batch_size,
            is_validation,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn dataset(&self) -> &RecordDataset<E> {
        &self.dataset
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn is_validation(&self) -> bool {
        self.is_validation
    }

    /// Number of batches in one full pass
    pub fn num_batches(&self) -> usize {
        self.dataset.size().div_ceil(self.batch_size)
    }

    /// Start a new pass over the dataset.
    pub fn iter(&mut self) -> Batches<'_, B, E> {
        let mut order: Vec<usize> = (0..self.dataset.size()).collect();
        if !self.is_validation {
            order.shuffle(&mut self.rng);
        }

        tracing::debug!(
            "Starting {} pass: {} items in {} batches",
            if self.is_validation { "validation" } else { "shuffled" },
            order.len(),
            self.num_batches(),
        );

        Batches {
            dataset:    &self.dataset,
            batcher:    &self.batcher,
            batch_size: self.batch_size,
            order,
            cursor:     0,
        }
    }
}

/// One pass over a dataset. Yields batches until the order is
/// exhausted; dropping it early is fine.
pub struct Batches<'a, B: Backend, E> {
    dataset:    &'a RecordDataset<E>,
    batcher:    &'a TweetBatcher<B>,
    batch_size: usize,
    order:      Vec<usize>,
    cursor:     usize,
}

impl<'a, B: Backend, E: TextEncoder> Batches<'a, B, E> {
    /// Dataset indices in the order this pass visits them
    pub fn order(&self) -> &[usize] {
        &self.order
    }
}

impl<'a, B: Backend, E: TextEncoder> Iterator for Batches<'a, B, E> {
    type Item = Result<TweetBatch<B>, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.order.len() {
            return None;
        }
        let end     = (self.cursor + self.batch_size).min(self.order.len());
        let indices = &self.order[self.cursor..end];
        self.cursor = end;

        let items: Result<Vec<_>, _> = indices.iter().map(|&i| self.dataset.get(i)).collect();
        Some(items.map(|items| self.batcher.batch(items)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.order.len() - self.cursor).div_ceil(self.batch_size);
        (remaining, Some(remaining))
    }
}
