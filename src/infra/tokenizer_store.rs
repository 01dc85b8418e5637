// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Resolves the tokenizer used by the Record Datasets and wraps
// it as a TextEncoder.
//
// Resolution order for an identifier such as "bert-base-uncased":
//   1. a path to a tokenizer.json file
//   2. a directory containing tokenizer.json
//   3. a model id on the Hugging Face hub (tokenizers "http")
//
// Every resolved tokenizer is configured for fixed-length output:
//   padding    → PaddingStrategy::Fixed(max_length)
//   truncation → max_length
//
// encode() at another length tokenizes with a copy configured for
// that length. Copies are cached per length and shared by clones.
//
// The pad token is the tokenizer's own: its padding params when
// already set, otherwise the first known pad token in its vocab.
//
// `from_vocab` builds a small WordLevel tokenizer in memory from
// a word list, for synthetic configurations that must not touch
// the network.
//
// Reference: tokenizers crate documentation

use std::{
    collections::HashMap,
    path::Path,
    str::FromStr,
    sync::{Arc, RwLock},
};

use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

use crate::domain::{encoded::Encoding, error::PipelineError, traits::TextEncoder};

/// Default pretrained tokenizer identifier
pub const DEFAULT_TOKENIZER: &str = "bert-base-uncased";

const PAD_TOKEN: &str = "[PAD]";
const UNK_TOKEN: &str = "[UNK]";

/// Pad tokens looked up when the tokenizer carries no padding params
const PAD_CANDIDATES: &[&str] = &[PAD_TOKEN, "<pad>", "<|pad|>", "<PAD>"];

pub struct TokenizerStore {
    identifier: String,
}

impl TokenizerStore {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self { identifier: identifier.into() }
    }

    /// Resolve the identifier and configure it for `max_length`.
    pub fn load(&self, max_length: usize) -> Result<HfEncoder, PipelineError> {
        let path = Path::new(&self.identifier);
        let tokenizer = if path.is_file() {
            tracing::info!("Loading tokenizer from file '{}'", path.display());
            Tokenizer::from_file(path)
        } else if path.join("tokenizer.json").is_file() {
            let file = path.join("tokenizer.json");
            tracing::info!("Loading tokenizer from '{}'", file.display());
            Tokenizer::from_file(file)
        } else {
            tracing::info!("Fetching pretrained tokenizer '{}'", self.identifier);
            Tokenizer::from_pretrained(&self.identifier, None)
        }
        .map_err(|e| {
            PipelineError::Tokenizer(format!("cannot load '{}': {}", self.identifier, e))
        })?;

        HfEncoder::new(tokenizer, max_length)
    }

    /// Build an in-memory WordLevel tokenizer over `words`.
    ///
    /// Ids: [PAD] = 0, [UNK] = 1, then the words in order from 2.
    /// Text is lowercased and split on whitespace/punctuation.
    pub fn from_vocab(words: &[&str], max_length: usize) -> Result<HfEncoder, PipelineError> {
        let mut vocab = serde_json::json!({ PAD_TOKEN: 0, UNK_TOKEN: 1 });
        let mut next_id = 2u32;
        for word in words {
            let w = word.to_lowercase();
            if vocab.get(&w).is_none() {
                vocab[w] = serde_json::json!(next_id);
                next_id += 1;
            }
        }

        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [
                {"id": 0, "content": PAD_TOKEN, "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 1, "content": UNK_TOKEN, "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
            ],
            "normalizer": {
                "type": "BertNormalizer",
                "clean_text": true,
                "handle_chinese_chars": true,
                "strip_accents": null,
                "lowercase": true
            },
            "pre_tokenizer": {
                "type": "Whitespace"
            },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab,
                "unk_token": UNK_TOKEN
            }
        });

        let tokenizer = Tokenizer::from_str(&tokenizer_json.to_string())
            .map_err(|e| PipelineError::Tokenizer(format!("cannot build word-level tokenizer: {e}")))?;

        tracing::debug!("Built word-level tokenizer with {} entries", next_id);
        HfEncoder::new(tokenizer, max_length)
    }
}

// ─── HfEncoder ────────────────────────────────────────────────────────────────
/// A Hugging Face tokenizer configured to pad and truncate to a
/// fixed length.
#[derive(Clone)]
pub struct HfEncoder {
    tokenizer:  Tokenizer,
    max_length: usize,
    pad_id:     u32,
    pad_token:  String,
    resized:    Arc<RwLock<HashMap<usize, Tokenizer>>>,
}

impl HfEncoder {
    pub fn new(mut tokenizer: Tokenizer, max_length: usize) -> Result<Self, PipelineError> {
        let (pad_id, pad_token) = resolve_pad(&tokenizer);
        fix_length(&mut tokenizer, max_length, pad_id, &pad_token)?;

        Ok(Self {
            tokenizer,
            max_length,
            pad_id,
            pad_token,
            resized: Arc::default(),
        })
    }

    /// Length the tokenizer pads/truncates to
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    fn encode_at(&self, text: &str, max_length: usize) -> Result<tokenizers::Encoding, PipelineError> {
        if max_length == self.max_length {
            return self.tokenizer.encode(text, true).map_err(encoding_error);
        }

        if let Some(tokenizer) = self.resized.read().map_err(poisoned)?.get(&max_length) {
            return tokenizer.encode(text, true).map_err(encoding_error);
        }

        let mut tokenizer = self.tokenizer.clone();
        fix_length(&mut tokenizer, max_length, self.pad_id, &self.pad_token)?;
        let encoded = tokenizer.encode(text, true).map_err(encoding_error);

        tracing::debug!("Configured tokenizer copy for max length {}", max_length);
        self.resized.write().map_err(poisoned)?.insert(max_length, tokenizer);
        encoded
    }
}

impl TextEncoder for HfEncoder {
    fn encode(&self, text: &str, max_length: usize) -> Result<Encoding, PipelineError> {
        let enc = self.encode_at(text, max_length)?;

        Ok(Encoding::new(enc.get_ids().to_vec(), enc.get_attention_mask().to_vec())
            .fit_to_length(max_length, self.pad_id))
    }

    fn pad_id(&self) -> u32 {
        self.pad_id
    }
}

fn resolve_pad(tokenizer: &Tokenizer) -> (u32, String) {
    if let Some(params) = tokenizer.get_padding() {
        return (params.pad_id, params.pad_token.clone());
    }
    for token in PAD_CANDIDATES {
        if let Some(id) = tokenizer.token_to_id(token) {
            return (id, token.to_string());
        }
    }
    tracing::warn!("Tokenizer has no pad token, padding with id 0 under a zero mask");
    (0, PAD_TOKEN.to_string())
}

fn fix_length(
    tokenizer:  &mut Tokenizer,
    max_length: usize,
    pad_id:     u32,
    pad_token:  &str,
) -> Result<(), PipelineError> {
    if max_length == 0 {
        return Err(PipelineError::InvalidConfig(
            "max length must be at least 1".to_string(),
        ));
    }

    tokenizer.with_padding(Some(PaddingParams {
        strategy:  PaddingStrategy::Fixed(max_length),
        pad_id,
        pad_token: pad_token.to_string(),
        ..Default::default()
    }));
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length,
            ..Default::default()
        }))
        .map_err(|e| PipelineError::Tokenizer(format!("cannot enable truncation: {e}")))?;
    Ok(())
}

fn encoding_error(e: tokenizers::Error) -> PipelineError {
    PipelineError::Encoding { index: None, message: e.to_string() }
}

fn poisoned<T>(_: T) -> PipelineError {
    PipelineError::Tokenizer("resized tokenizer cache lock poisoned".to_string())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_padded_to_max_length() {
        let enc = TokenizerStore::from_vocab(&["hi", "stock"], 32).unwrap();
        let out = enc.encode("hi", 32).unwrap();

        assert_eq!(out.input_ids.len(), 32);
        assert_eq!(out.attention_mask.len(), 32);
        assert_eq!(out.input_ids[0], 2);
        assert_eq!(out.attention_mask[0], 1);
        assert!(out.input_ids[1..].iter().all(|&id| id == 0));
        assert!(out.attention_mask[1..].iter().all(|&m| m == 0));
    }

    #[test]
    fn test_long_text_truncated() {
        let enc  = TokenizerStore::from_vocab(&["up"], 4).unwrap();
        let text = "up ".repeat(20);
        let out  = enc.encode(&text, 4).unwrap();
        assert_eq!(out.input_ids, vec![2, 2, 2, 2]);
        assert_eq!(out.attention_mask, vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_unknown_words_map_to_unk() {
        let enc = TokenizerStore::from_vocab(&["flat"], 4).unwrap();
        let out = enc.encode("Flat mystery", 4).unwrap();
        assert_eq!(&out.input_ids[..2], &[2, 1]);
        assert_eq!(out.token_count(), 2);
    }

    #[test]
    fn test_pad_id_is_pad_token() {
        let enc = TokenizerStore::from_vocab(&["a"], 8).unwrap();
        assert_eq!(enc.pad_id(), 0);
        assert_eq!(enc.max_length(), 8);
    }

    #[test]
    fn test_zero_max_length_rejected() {
        assert!(matches!(
            TokenizerStore::from_vocab(&["a"], 0),
            Err(PipelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_from_directory_reconfigures_length() {
        let dir = std::env::temp_dir().join(format!("tweet-prep-tok-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let built = TokenizerStore::from_vocab(&["hi"], 32).unwrap();
        built.tokenizer().save(dir.join("tokenizer.json"), false).unwrap();

        let loaded = TokenizerStore::new(dir.to_string_lossy()).load(16).unwrap();
        let out    = loaded.encode("hi", 16).unwrap();
        assert_eq!(out.input_ids.len(), 16);
        assert_eq!(out.input_ids[0], 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_encode_at_other_length_truncates_there() {
        let enc  = TokenizerStore::from_vocab(&["up"], 4).unwrap();
        let text = "up up up up up up";

        let longer = enc.encode(text, 8).unwrap();
        assert_eq!(longer.input_ids, vec![2, 2, 2, 2, 2, 2, 0, 0]);
        assert_eq!(longer.token_count(), 6);

        let shorter = enc.encode(text, 2).unwrap();
        assert_eq!(shorter.input_ids, vec![2, 2]);

        // built length still served, and repeat calls hit the cached copy
        assert_eq!(enc.encode(text, 4).unwrap().input_ids, vec![2, 2, 2, 2]);
        assert_eq!(enc.encode(text, 8).unwrap(), longer);
    }

    fn angle_bracket_tokenizer() -> Tokenizer {
        let json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [
                {"id": 0, "content": "<unk>", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 1, "content": "<pad>", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
            ],
            "normalizer": null,
            "pre_tokenizer": {"type": "Whitespace"},
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": {"<unk>": 0, "<pad>": 1, "up": 2},
                "unk_token": "<unk>"
            }
        });
        Tokenizer::from_str(&json.to_string()).unwrap()
    }

    #[test]
    fn test_pad_token_found_in_vocab() {
        let enc = HfEncoder::new(angle_bracket_tokenizer(), 4).unwrap();
        assert_eq!(enc.pad_id(), 1);

        let out = enc.encode("up", 4).unwrap();
        assert_eq!(out.input_ids, vec![2, 1, 1, 1]);
        assert_eq!(out.attention_mask, vec![1, 0, 0, 0]);
    }

    #[test]
    fn test_existing_padding_params_are_kept() {
        let mut tokenizer = angle_bracket_tokenizer();
        tokenizer.with_padding(Some(PaddingParams {
            pad_id:    2,
            pad_token: "up".to_string(),
            ..Default::default()
        }));

        let enc = HfEncoder::new(tokenizer, 3).unwrap();
        assert_eq!(enc.pad_id(), 2);
        assert_eq!(enc.encode("zzz", 3).unwrap().attention_mask, vec![1, 0, 0]);
    }
}
