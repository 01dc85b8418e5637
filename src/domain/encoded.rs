// ============================================================
// Layer 3 — Encoded Item Domain Types
// ============================================================
// Encoding:    what the tokenizer hands back for one text
// EncodedItem: one record ready for the model — fixed-length ids
//              and mask plus the auxiliary feature and the label
//
// Both are plain data; the Record Dataset produces them on each
// access and nothing caches them.

use serde::{Deserialize, Serialize};

/// Token ids and attention mask for one text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encoding {
    pub input_ids:      Vec<u32>,
    /// 1 = real token, 0 = padding
    pub attention_mask: Vec<u32>,
}

impl Encoding {
    pub fn new(input_ids: Vec<u32>, attention_mask: Vec<u32>) -> Self {
        Self { input_ids, attention_mask }
    }

    /// Force both sequences to exactly `max_length` entries.
    /// Longer sequences are cut, shorter ones padded with
    /// `pad_id` and mask 0.
    pub fn fit_to_length(mut self, max_length: usize, pad_id: u32) -> Self {
        self.input_ids.resize(max_length, pad_id);
        self.attention_mask.resize(max_length, 0);
        self
    }

    /// Number of non-padding tokens
    pub fn token_count(&self) -> usize {
        self.attention_mask.iter().filter(|&&m| m != 0).count()
    }
}

/// One dataset item, shaped for the training loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedItem {
    /// Exactly max_length token ids
    pub input_ids:      Vec<u32>,
    /// Exactly max_length mask entries
    pub attention_mask: Vec<u32>,
    /// 1.0 if the tweet carried a source link, else 0.0
    pub has_source:     f32,
    /// Sentiment category id
    pub label:          i64,
}

impl EncodedItem {
    pub fn seq_len(&self) -> usize {
        self.input_ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_pads_short_sequences() {
        let enc = Encoding::new(vec![7, 8], vec![1, 1]).fit_to_length(5, 0);
        assert_eq!(enc.input_ids, vec![7, 8, 0, 0, 0]);
        assert_eq!(enc.attention_mask, vec![1, 1, 0, 0, 0]);
        assert_eq!(enc.token_count(), 2);
    }

    #[test]
    fn test_fit_truncates_long_sequences() {
        let enc = Encoding::new(vec![1, 2, 3, 4], vec![1; 4]).fit_to_length(2, 0);
        assert_eq!(enc.input_ids, vec![1, 2]);
        assert_eq!(enc.attention_mask, vec![1, 1]);
    }
}
