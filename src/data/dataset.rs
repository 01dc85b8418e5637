// ============================================================
// Layer 4 — Record Dataset
// ============================================================
// An indexable view over one split's RecordSet plus a text
// encoder and a fixed max length L.
//
//   size()  → number of records, fixed for the dataset's life
//   get(i)  → EncodedItem with ids/mask of exactly L entries
//
// Tokenisation happens on every get(); nothing is cached.

use crate::domain::{
    encoded::EncodedItem,
    error::PipelineError,
    record::RecordSet,
    traits::TextEncoder,
};

/// Default number of tokens per encoded sequence
pub const DEFAULT_MAX_LENGTH: usize = 32;

pub struct RecordDataset<E> {
    records:    RecordSet,
    encoder:    E,
    max_length: usize,
}

impl<E: TextEncoder> RecordDataset<E> {
    pub fn new(records: RecordSet, encoder: E, max_length: usize) -> Result<Self, PipelineError> {
        if max_length == 0 {
            return Err(PipelineError::InvalidConfig(
                "max length must be at least 1".to_string(),
            ));
        }
        Ok(Self { records, encoder, max_length })
    }

    /// Number of records
    pub fn size(&self) -> usize {
        self.records.len()
    }

    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    /// Encode the record at `index`.
    pub fn get(&self, index: usize) -> Result<EncodedItem, PipelineError> {
        let len = self.size();
        let record = self
            .records
            .get(index)
            .ok_or(PipelineError::IndexOutOfBounds { index, len })?;

        let encoding = self
            .encoder
            .encode(&record.text, self.max_length)
            .map_err(|e| match e {
                PipelineError::Encoding { message, .. } => PipelineError::Encoding {
                    index: Some(index),
                    message,
                },
                other => other,
            })?
            .fit_to_length(self.max_length, self.encoder.pad_id());

        Ok(EncodedItem {
            input_ids:      encoding.input_ids,
            attention_mask: encoding.attention_mask,
            has_source:     if record.has_source { 1.0 } else { 0.0 },
            label:          record.label,
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{encoded::Encoding, record::Record};
    use crate::infra::tokenizer_store::TokenizerStore;

    /// One id per whitespace word (its byte length), no padding
    /// or truncation of its own.
    struct WordLenEncoder;

    impl TextEncoder for WordLenEncoder {
        fn encode(&self, text: &str, _max_length: usize) -> Result<Encoding, PipelineError> {
            if text.contains('\u{0}') {
                return Err(PipelineError::Encoding {
                    index:   None,
                    message: "nul byte".to_string(),
                });
            }
            let ids: Vec<u32> = text.split_whitespace().map(|w| w.len() as u32).collect();
            let mask = vec![1; ids.len()];
            Ok(Encoding::new(ids, mask))
        }
    }

    fn dataset(texts: &[&str], max_length: usize) -> RecordDataset<WordLenEncoder> {
        let records: RecordSet = texts
            .iter()
            .enumerate()
            .map(|(i, t)| Record {
                text:       t.to_string(),
                label:      i as i64,
                has_source: i % 2 == 1,
            })
            .collect();
        RecordDataset::new(records, WordLenEncoder, max_length).unwrap()
    }

    #[test]
    fn test_size_matches_records() {
        let ds = dataset(&["a", "b", "c"], 8);
        assert_eq!(ds.size(), 3);
        assert!(!ds.is_empty());
    }

    #[test]
    fn test_short_text_is_padded() {
        let ds   = dataset(&["hi"], 32);
        let item = ds.get(0).unwrap();
        assert_eq!(item.input_ids.len(), 32);
        assert_eq!(item.attention_mask.len(), 32);
        assert_eq!(item.input_ids[0], 2);
        assert!(item.input_ids[1..].iter().all(|&id| id == 0));
        assert_eq!(item.attention_mask[0], 1);
        assert!(item.attention_mask[1..].iter().all(|&m| m == 0));
    }

    #[test]
    fn test_long_text_is_truncated() {
        let long = "word ".repeat(100);
        let ds   = dataset(&[long.as_str()], 16);
        let item = ds.get(0).unwrap();
        assert_eq!(item.seq_len(), 16);
        assert!(item.attention_mask.iter().all(|&m| m == 1));
    }

    #[test]
    fn test_features_and_labels_cast() {
        let ds = dataset(&["a", "b"], 4);
        let first  = ds.get(0).unwrap();
        let second = ds.get(1).unwrap();
        assert_eq!(first.has_source, 0.0);
        assert_eq!(second.has_source, 1.0);
        assert_eq!(first.label, 0);
        assert_eq!(second.label, 1);
    }

    #[test]
    fn test_get_is_repeatable() {
        let ds = dataset(&["same text twice"], 8);
        assert_eq!(ds.get(0).unwrap(), ds.get(0).unwrap());
    }

    #[test]
    fn test_out_of_bounds() {
        let ds = dataset(&["a", "b"], 4);
        assert!(matches!(
            ds.get(2),
            Err(PipelineError::IndexOutOfBounds { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_encoding_error_carries_index() {
        let ds  = dataset(&["fine", "bad\u{0}text"], 4);
        let err = ds.get(1).unwrap_err();
        assert!(matches!(err, PipelineError::Encoding { index: Some(1), .. }));
    }

    #[test]
    fn test_zero_max_length_rejected() {
        let result = RecordDataset::new(RecordSet::default(), WordLenEncoder, 0);
        assert!(matches!(result, Err(PipelineError::InvalidConfig(_))));
    }

    #[test]
    fn test_dataset_length_drives_tokenizer_truncation() {
        let encoder = TokenizerStore::from_vocab(&["up"], 4).unwrap();
        let records: RecordSet = std::iter::once(Record::new("up up up up up up", 0)).collect();
        let ds   = RecordDataset::new(records, encoder, 8).unwrap();
        let item = ds.get(0).unwrap();

        assert_eq!(item.seq_len(), 8);
        assert_eq!(item.input_ids, vec![2, 2, 2, 2, 2, 2, 0, 0]);
        assert_eq!(item.attention_mask.iter().sum::<u32>(), 6);
    }
}
