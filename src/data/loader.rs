// ============================================================
// Layer 4 — CSV Corpus Loader
// ============================================================
// Reads labelled tweets from a comma-separated file using the
// csv crate.
//
// Expected layout (header row required, extra columns ignored):
//
//   text,label
//   "$AAPL beats estimates https://t.co/x",1
//   "Markets flat ahead of Fed",0
//
// Column names come from ColumnConfig. Every failure (missing
// file, missing column, malformed row, non-integer label) is
// returned to the caller; no row is ever skipped.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use std::{fs::File, io::Read, path::PathBuf};

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::domain::{
    error::PipelineError,
    record::{Record, RecordSet},
    traits::RecordSource,
};

/// Names of the CSV columns the loader reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub text:  String,
    pub label: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            text:  "text".to_string(),
            label: "label".to_string(),
        }
    }
}

/// Loads a RecordSet from one CSV file.
/// Implements the RecordSource trait from Layer 3.
pub struct CsvLoader {
    path:    PathBuf,
    columns: ColumnConfig,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>, columns: ColumnConfig) -> Self {
        Self { path: path.into(), columns }
    }

    /// Parse CSV from any reader; `load_all` calls this with the file.
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<RecordSet, PipelineError> {
        let mut csv = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers   = csv.headers()?.clone();
        let find      = |name: &str| {
            headers.iter().position(|h| h.trim() == name).ok_or_else(|| {
                PipelineError::Load(format!(
                    "column '{}' not found in header [{}]",
                    name,
                    headers.iter().collect::<Vec<_>>().join(", ")
                ))
            })
        };
        let text_col  = find(&self.columns.text)?;
        let label_col = find(&self.columns.label)?;

        let mut records = Vec::new();
        for (row, result) in csv.records().enumerate() {
            let line  = result?;
            let text  = line.get(text_col).unwrap_or_default();
            let raw   = line.get(label_col).unwrap_or_default().trim();
            let label = raw.parse::<i64>().map_err(|e| {
                PipelineError::Load(format!(
                    "row {}: label '{}' is not an integer: {}",
                    row + 1,
                    raw,
                    e
                ))
            })?;
            records.push(Record::new(text, label));
        }

        Ok(records.into_iter().collect())
    }
}

impl RecordSource for CsvLoader {
    fn load_all(&self) -> Result<RecordSet, PipelineError> {
        let file = File::open(&self.path).map_err(|e| {
            PipelineError::Load(format!("cannot open '{}': {}", self.path.display(), e))
        })?;

        let records = self.load_from_reader(file)?;
        tracing::info!(
            "Loaded {} records from '{}'",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn loader() -> CsvLoader {
        CsvLoader::new("unused.csv", ColumnConfig::default())
    }

    #[test]
    fn test_reads_text_and_label() {
        let csv = "text,label\n\"Stock X up 5% https://example.com/abc\",1\nStock Y flat,0\n";
        let set = loader().load_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.texts()[0], "Stock X up 5% https://example.com/abc");
        assert_eq!(set.labels(), &[1, 0]);
        assert_eq!(set.has_source(), &[false, false]);
    }

    #[test]
    fn test_column_order_and_extra_columns() {
        let csv = "id,label,text\n9,2,\"hello, world\"\n";
        let set = loader().load_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(set.texts()[0], "hello, world");
        assert_eq!(set.labels(), &[2]);
    }

    #[test]
    fn test_custom_column_names() {
        let columns = ColumnConfig { text: "tweet".into(), label: "sentiment".into() };
        let csv     = "tweet,sentiment\nup,1\n";
        let set     = CsvLoader::new("x.csv", columns).load_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(set.labels(), &[1]);
    }

    #[test]
    fn test_missing_column() {
        let csv = "body,label\nup,1\n";
        let err = loader().load_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, PipelineError::Load(_)));
    }

    #[test]
    fn test_bad_label() {
        let csv = "text,label\nup,positive\n";
        let err = loader().load_from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_ragged_row_is_an_error() {
        let csv = "text,label\nup,1\ndown\n";
        assert!(loader().load_from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let loader = CsvLoader::new("/definitely/not/here.csv", ColumnConfig::default());
        assert!(matches!(loader.load_all(), Err(PipelineError::Load(_))));
    }
}
