//! Loading and cleaning the paper dataset.
//!
//! ```text
//! DatasetSource::load      (source.rs)   CSV file / in-memory rows
//!        │
//!        v
//!   Vec<RawRecord>
//!        │
//!        v
//!   clean                  (pipeline.rs) drop untitled rows, default text,
//!        │                               normalize years, count words
//!        v
//!   Dataset + CleanStats
//!        │
//!        v
//!   DatasetService         (service.rs)  load once, share as Arc<Dataset>,
//!                                        reload only after invalidate()
//! ```
//!
//! A [`Dataset`] is immutable once built. Every view over it (filtering,
//! aggregation) borrows from it rather than copying rows.

#[path = "dataset/metrics.rs"]
mod metrics;
#[path = "dataset/pipeline.rs"]
mod pipeline;
#[path = "dataset/service.rs"]
mod service;
#[path = "dataset/source.rs"]
mod source;

pub use metrics::LoadMetrics;
pub use pipeline::{CleanStats, clean};
pub use service::DatasetService;
pub use source::{CsvSource, DatasetSource, LoadError, MemorySource, REQUIRED_COLUMNS};

use crate::Paper;
use std::collections::BTreeSet;

/// The cleaned, immutable paper table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    papers: Vec<Paper>,
    stats: CleanStats,
}

impl Dataset {
    pub(crate) fn new(papers: Vec<Paper>, stats: CleanStats) -> Self {
        Dataset { papers, stats }
    }

    /// Cleaned records, in source order.
    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    /// Row accounting from the cleaning pass that produced this dataset.
    pub fn stats(&self) -> &CleanStats {
        &self.stats
    }

    /// Smallest and largest year present, or `None` for an empty dataset.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.papers.iter().map(|p| p.year).min()?;
        let max = self.papers.iter().map(|p| p.year).max()?;
        Some((min, max))
    }

    /// Distinct journal names, sorted.
    pub fn journals(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.papers.iter().map(|p| p.journal.as_str()).collect();
        set.into_iter().collect()
    }

    pub fn journal_count(&self) -> usize {
        self.journals().len()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::RawRecord;

    pub fn raw(title: Option<&str>, publish_time: Option<&str>, journal: Option<&str>) -> RawRecord {
        RawRecord {
            title: title.map(str::to_string),
            abstract_text: Some(format!("Abstract for {}", title.unwrap_or("nothing"))),
            publish_time: publish_time.map(str::to_string),
            journal: journal.map(str::to_string),
            authors: Some("Smith, A.; Jones, B.".to_string()),
        }
    }

    /// A small mixed-quality sample in the spirit of CORD-19 metadata.
    pub fn sample_rows() -> Vec<RawRecord> {
        vec![
            raw(Some("Coronavirus spike protein structure"), Some("2020-03-15"), Some("Nature")),
            raw(Some("SARS transmission in hospitals"), Some("2003"), Some("Lancet")),
            raw(None, Some("2020-04-01"), Some("Nature")),
            raw(Some("MERS outbreak report"), Some("2015 Jun 2"), None),
            raw(Some("Undated editorial"), Some("no date info"), Some("BMJ")),
            raw(Some("Vaccine candidates for coronavirus"), Some("March 2020"), Some("Nature")),
            raw(Some("Influenza seasonality"), None, Some("Lancet")),
            raw(Some("Bat coronavirus reservoirs"), Some("2019-11-30"), Some("Virology")),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::sample_rows;
    use super::*;

    #[test]
    fn bounds_and_journals_follow_cleaned_rows() {
        let dataset = clean(sample_rows());

        assert_eq!(dataset.len(), 5);
        assert_eq!(dataset.year_bounds(), Some((2003, 2020)));
        assert_eq!(dataset.journals(), vec!["Lancet", "Nature", "Unknown", "Virology"]);
        assert_eq!(dataset.journal_count(), 4);
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let dataset = clean(Vec::new());
        assert!(dataset.is_empty());
        assert_eq!(dataset.year_bounds(), None);
        assert!(dataset.journals().is_empty());
    }
}
