// ============================================================
// Layer 4 — Tweet Normalizer
// ============================================================
// Strips embedded hyperlinks from tweet text and records that a
// link was there in the derived `has_source` flag.
//
// Rule, applied to each record independently:
//   text contains "https"  → remove every `http\S+` run, trim,
//                            has_source = true
//   otherwise              → text untouched, flag left as is
//                            (false for freshly loaded records)
//
// Only the literal "https" triggers the rule. A tweet whose
// only link is plain `http://...` is neither stripped nor
// flagged.
//
// normalize(normalize(x)) == normalize(x): a normalised tweet
// no longer contains "https" and keeps its flag.
//
// Reference: regex crate documentation
//            Rust Book §13 (Iterators and Closures)

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::record::{Record, RecordSet};

/// Marker whose presence flags a tweet as carrying a source link
const LINK_TRIGGER: &str = "https";

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+").unwrap());

pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalise one record, returning a new one.
    pub fn normalize_record(&self, record: &Record) -> Record {
        if record.text.contains(LINK_TRIGGER) {
            Record {
                text:       URL_RE.replace_all(&record.text, "").trim().to_string(),
                label:      record.label,
                has_source: true,
            }
        } else {
            record.clone()
        }
    }

    /// Normalise every record. Output is index-aligned with the
    /// input and has the same length.
    pub fn normalize(&self, records: &RecordSet) -> RecordSet {
        let out: RecordSet = records.iter().map(|r| self.normalize_record(&r)).collect();

        tracing::debug!(
            "Normalised {} records, {} carry a source link",
            out.len(),
            out.source_count()
        );
        out
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
