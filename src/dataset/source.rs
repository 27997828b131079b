//! Where raw rows come from.
//!
//! [`DatasetSource`] is the seam between the explorer and storage. The CSV
//! reader is the production implementation; [`MemorySource`] serves tests and
//! embedders that already hold rows.

use crate::RawRecord;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Columns that must appear in the header of a source file.
pub const REQUIRED_COLUMNS: [&str; 5] = ["title", "abstract", "publish_time", "journal", "authors"];

/// Cell values that count as missing data, matching the usual CSV NA markers.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>", "N/A", "NA",
    "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source file could not be opened.
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid CSV or a row could not be decoded.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A row has more cells than the header. Short rows are accepted and
    /// their trailing columns read as missing.
    #[error("line {line}: expected at most {expected} fields, found {found}")]
    RaggedRow { line: u64, expected: usize, found: usize },

    /// A required header is absent.
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// Something that can produce the raw rows of the dataset.
pub trait DatasetSource {
    fn load(&self) -> Result<Vec<RawRecord>, LoadError>;

    /// Short human-readable description for logs and the terminal header.
    fn describe(&self) -> String;
}

/// Reads rows from a CSV file with a header line.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode rows from any reader. Used by [`DatasetSource::load`] and handy
    /// for tests over in-memory bytes.
    pub fn read_from<R: Read>(reader: R) -> Result<Vec<RawRecord>, LoadError> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(LoadError::MissingColumn(column));
            }
        }

        let mut rows = Vec::new();
        for line in reader.records() {
            let record = line?;
            if record.len() > headers.len() {
                return Err(LoadError::RaggedRow {
                    line: record.position().map_or(0, |pos| pos.line()),
                    expected: headers.len(),
                    found: record.len(),
                });
            }
            let row: RawRecord = record.deserialize(Some(&headers))?;
            rows.push(scrub_na(row));
        }

        Ok(rows)
    }
}

impl DatasetSource for CsvSource {
    fn load(&self) -> Result<Vec<RawRecord>, LoadError> {
        debug!("Opening dataset file: {}", self.path.display());
        let file = File::open(&self.path).map_err(|source| LoadError::Open { path: self.path.clone(), source })?;
        Self::read_from(file)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<RawRecord>,
}

impl MemorySource {
    pub fn new(rows: Vec<RawRecord>) -> Self {
        MemorySource { rows }
    }
}

impl DatasetSource for MemorySource {
    fn load(&self) -> Result<Vec<RawRecord>, LoadError> {
        Ok(self.rows.clone())
    }

    fn describe(&self) -> String {
        format!("<memory: {} rows>", self.rows.len())
    }
}

fn scrub_na(record: RawRecord) -> RawRecord {
    RawRecord {
        title: not_na(record.title),
        abstract_text: not_na(record.abstract_text),
        publish_time: not_na(record.publish_time),
        journal: not_na(record.journal),
        authors: not_na(record.authors),
    }
}

fn not_na(value: Option<String>) -> Option<String> {
    value.filter(|s| !NA_TOKENS.contains(&s.as_str()))
}
