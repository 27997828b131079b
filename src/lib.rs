#[macro_use]
mod macros;
mod aggregate;
mod api;
mod dataset;
mod filter;
mod normalize;

pub use aggregate::{
    Histogram, HistogramBin, JournalCount, WordCount, YearCount, title_corpus, title_word_frequencies, top_journals,
    year_counts,
};
pub use api::{Dashboard, Options, Overview, Panels, SampleRow, explore};
pub use dataset::{
    CleanStats, CsvSource, Dataset, DatasetService, DatasetSource, LoadError, LoadMetrics, MemorySource,
    REQUIRED_COLUMNS, clean,
};
pub use filter::{ALL_JOURNALS, Filter, JournalChoice, journal_options};
pub use normalize::{RawDate, normalize_year};

use serde::{Deserialize, Serialize};

/// Substituted for a missing abstract.
pub const NO_ABSTRACT: &str = "No abstract available";
/// Substituted for a missing journal.
pub const UNKNOWN_JOURNAL: &str = "Unknown";
/// Substituted for a missing author list.
pub const UNKNOWN_AUTHORS: &str = "Unknown authors";

// --- Data model -------------------------------------------------------------

/// One row of the input table, before cleaning.
///
/// Only the columns the explorer cares about are kept; anything else in the
/// source file is ignored. `None` means the cell was empty or held an NA
/// token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub publish_time: Option<String>,
    pub journal: Option<String>,
    pub authors: Option<String>,
}

/// A cleaned paper record.
///
/// Every `Paper` has a non-empty title and a year; the remaining text fields
/// carry sentinel defaults instead of being absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paper {
    pub title: String,
    pub abstract_text: String,
    /// The publish date exactly as it appeared in the source.
    pub publish_time: Option<String>,
    pub year: i32,
    pub journal: String,
    pub authors: String,
    pub abstract_word_count: usize,
    pub title_word_count: usize,
}

impl From<&Paper> for RawRecord {
    fn from(paper: &Paper) -> Self {
        RawRecord {
            title: Some(paper.title.clone()),
            abstract_text: Some(paper.abstract_text.clone()),
            publish_time: paper.publish_time.clone(),
            journal: Some(paper.journal.clone()),
            authors: Some(paper.authors.clone()),
        }
    }
}

/// Number of whitespace-separated tokens in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_collapses_runs_of_whitespace() {
        assert_eq!(word_count("A B  C"), 3);
        assert_eq!(word_count("  leading\tand\ntrailing  "), 3);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn raw_projection_keeps_cleaned_fields() {
        let paper = Paper {
            title: "Spike protein".to_string(),
            abstract_text: NO_ABSTRACT.to_string(),
            publish_time: Some("2020-03-15".to_string()),
            year: 2020,
            journal: UNKNOWN_JOURNAL.to_string(),
            authors: "Doe, J.".to_string(),
            abstract_word_count: 3,
            title_word_count: 2,
        };

        let raw = RawRecord::from(&paper);
        assert_eq!(raw.title.as_deref(), Some("Spike protein"));
        assert_eq!(raw.abstract_text.as_deref(), Some(NO_ABSTRACT));
        assert_eq!(raw.publish_time.as_deref(), Some("2020-03-15"));
        assert_eq!(raw.journal.as_deref(), Some(UNKNOWN_JOURNAL));
    }
}
