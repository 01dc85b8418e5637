// ============================================================
// Layer 4 — Tweet Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<EncodedItem>
// into one TweetBatch of tensors.
//
// How batching works here:
//   Input:  n EncodedItems, each with sequences of length L
//   Output: TweetBatch with
//             input_ids      [n, L]  Int
//             attention_mask [n, L]  Int
//             has_source     [n]     Float
//             labels         [n]     Int
//
//   Sequences are flattened into one Vec and reshaped:
//   [s1_t1, ..., s1_tL, s2_t1, ..., sn_tL] → [n, L]
//
// Every item already has exactly L entries (the Record Dataset
// guarantees it), so no padding happens here.
//
// Reference: Burn Book §4 (Batcher)

use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::domain::encoded::EncodedItem;

// ─── TweetBatch ───────────────────────────────────────────────────────────────
/// A batch of encoded tweets. Every tensor has the batch size as
/// its first dimension.
#[derive(Debug, Clone)]
pub struct TweetBatch<B: Backend> {
    /// Token ids — shape: [batch_size, max_length]
    pub input_ids: Tensor<B, 2, Int>,

    /// 1 = real token, 0 = padding — shape: [batch_size, max_length]
    pub attention_mask: Tensor<B, 2, Int>,

    /// Source-link feature as 0.0 / 1.0 — shape: [batch_size]
    pub has_source: Tensor<B, 1>,

    /// Sentiment category ids — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

impl<B: Backend> TweetBatch<B> {
    /// Number of items stacked in this batch
    pub fn len(&self) -> usize {
        self.labels.dims()[0]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ─── TweetBatcher ─────────────────────────────────────────────────────────────
/// Holds the device tensors are created on.
#[derive(Clone, Debug)]
pub struct TweetBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> TweetBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<EncodedItem, TweetBatch<B>> for TweetBatcher<B> {
    fn batch(&self, items: Vec<EncodedItem>) -> TweetBatch<B> {
        let batch_size = items.len();
        let seq_len    = items.first().map(EncodedItem::seq_len).unwrap_or(0);

        let input_flat: Vec<i32> = items
            .iter()
            .flat_map(|item| item.input_ids.iter().map(|&x| x as i32))
            .collect();

        let mask_flat: Vec<i32> = items
            .iter()
            .flat_map(|item| item.attention_mask.iter().map(|&x| x as i32))
            .collect();

        let has_source: Vec<f32> = items.iter().map(|item| item.has_source).collect();
        let labels: Vec<i64>     = items.iter().map(|item| item.label).collect();

        let input_ids = Tensor::<B, 1, Int>::from_ints(input_flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);

        let attention_mask = Tensor::<B, 1, Int>::from_ints(mask_flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);

        let has_source = Tensor::<B, 1>::from_floats(has_source.as_slice(), &self.device);
        let labels     = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        TweetBatch {
            input_ids,
            attention_mask,
            has_source,
            labels,
        }
    }
}
