// ============================================================
// Layer 3 — Record and RecordSet Domain Types
// ============================================================
// A Record is one labelled tweet plus the derived `has_source`
// flag. A RecordSet stores many records as three parallel
// columns (text, has_source, label).
//
// Invariant: all three columns always have the same length and
// entry i of each column belongs to the same tweet. The columns
// are private, so the only ways to build a RecordSet go through
// constructors that check this.
//
// Reference: Rust Book §5 (Structs), §8 (Vectors)

use serde::{Deserialize, Serialize};

use crate::domain::error::PipelineError;

/// One labelled sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Tweet text (raw or normalised depending on pipeline stage)
    pub text: String,

    /// Sentiment category id
    pub label: i64,

    /// True iff the original text carried an embedded https link.
    /// Never read from input — set by the Normalizer.
    pub has_source: bool,
}

impl Record {
    /// A freshly loaded record: the flag starts cleared.
    pub fn new(text: impl Into<String>, label: i64) -> Self {
        Self {
            text: text.into(),
            label,
            has_source: false,
        }
    }
}

/// Aligned parallel columns of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    texts:      Vec<String>,
    has_source: Vec<bool>,
    labels:     Vec<i64>,
}

impl RecordSet {
    /// Build from three columns, failing if their lengths differ.
    pub fn from_columns(
        texts:      Vec<String>,
        has_source: Vec<bool>,
        labels:     Vec<i64>,
    ) -> Result<Self, PipelineError> {
        if texts.len() != has_source.len() || texts.len() != labels.len() {
            return Err(PipelineError::InputShape(format!(
                "misaligned columns: {} texts, {} has_source flags, {} labels",
                texts.len(),
                has_source.len(),
                labels.len()
            )));
        }
        Ok(Self { texts, has_source, labels })
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn has_source(&self) -> &[bool] {
        &self.has_source
    }

    pub fn labels(&self) -> &[i64] {
        &self.labels
    }

    /// Reassemble the record at `index`, if any.
    pub fn get(&self, index: usize) -> Option<Record> {
        Some(Record {
            text:       self.texts.get(index)?.clone(),
            label:      *self.labels.get(index)?,
            has_source: *self.has_source.get(index)?,
        })
    }

    /// Iterate records in index order.
    pub fn iter(&self) -> impl Iterator<Item = Record> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Gather the records at `indices` (in that order) into a new set.
    /// Callers pass indices produced from `0..len()`.
    pub fn select(&self, indices: &[usize]) -> Result<Self, PipelineError> {
        let mut out = Self {
            texts:      Vec::with_capacity(indices.len()),
            has_source: Vec::with_capacity(indices.len()),
            labels:     Vec::with_capacity(indices.len()),
        };
        for &i in indices {
            let record = self.get(i).ok_or(PipelineError::IndexOutOfBounds {
                index: i,
                len:   self.len(),
            })?;
            out.push(record);
        }
        Ok(out)
    }

    /// Number of records flagged with an embedded source link
    pub fn source_count(&self) -> usize {
        self.has_source.iter().filter(|&&f| f).count()
    }

    fn push(&mut self, record: Record) {
        self.texts.push(record.text);
        self.has_source.push(record.has_source);
        self.labels.push(record.label);
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut set = RecordSet::default();
        for record in iter {
            set.push(record);
        }
        set
    }
}

/// Output of the Splitter: two disjoint subsets of one RecordSet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitResult {
    pub train: RecordSet,
    pub test:  RecordSet,
}
