//! Year-range and journal filtering.

use crate::{Dataset, Paper};
use std::ops::RangeInclusive;

/// Selector value meaning "no journal restriction".
pub const ALL_JOURNALS: &str = "All";

/// Journal restriction of a [`Filter`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JournalChoice {
    #[default]
    All,
    /// Exact, case-sensitive journal name.
    Only(String),
}

impl JournalChoice {
    /// Map a selector value to a choice; [`ALL_JOURNALS`] means no restriction.
    pub fn from_selector(value: &str) -> Self {
        if value == ALL_JOURNALS { JournalChoice::All } else { JournalChoice::Only(value.to_string()) }
    }

    pub fn matches(&self, journal: &str) -> bool {
        match self {
            JournalChoice::All => true,
            JournalChoice::Only(name) => name == journal,
        }
    }
}

/// A closed year range plus an optional journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub years: RangeInclusive<i32>,
    pub journal: JournalChoice,
}

impl Filter {
    pub fn new(years: RangeInclusive<i32>, journal: JournalChoice) -> Self {
        Filter { years, journal }
    }

    /// The filter a fresh session starts with: every observed year, all
    /// journals. An empty dataset gets an empty range.
    pub fn everything(dataset: &Dataset) -> Self {
        let years = match dataset.year_bounds() {
            Some((min, max)) => min..=max,
            #[allow(clippy::reversed_empty_ranges)]
            None => 1..=0,
        };
        Filter { years, journal: JournalChoice::All }
    }

    pub fn matches(&self, paper: &Paper) -> bool {
        self.years.contains(&paper.year) && self.journal.matches(&paper.journal)
    }

    /// Matching papers in dataset order. The dataset itself is untouched.
    pub fn apply<'a>(&self, papers: &'a [Paper]) -> Vec<&'a Paper> {
        papers.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Values offered by the journal selector: [`ALL_JOURNALS`] followed by every
/// distinct journal in the dataset, sorted.
pub fn journal_options(dataset: &Dataset) -> Vec<String> {
    std::iter::once(ALL_JOURNALS.to_string()).chain(dataset.journals().into_iter().map(str::to_string)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean;
    use crate::dataset::fixtures::sample_rows;

    #[test]
    fn full_range_and_all_journals_keeps_everything() {
        let dataset = clean(sample_rows());
        let filter = Filter::everything(&dataset);

        let kept = filter.apply(dataset.papers());
        assert_eq!(kept.len(), dataset.len());
        assert!(kept.iter().zip(dataset.papers()).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn range_outside_the_dataset_is_empty() {
        let dataset = clean(sample_rows());
        assert!(Filter::new(1900..=1950, JournalChoice::All).apply(dataset.papers()).is_empty());
        assert!(Filter::new(2021..=2030, JournalChoice::All).apply(dataset.papers()).is_empty());
    }

    #[test]
    fn year_bounds_are_inclusive() {
        let dataset = clean(sample_rows());
        let kept = Filter::new(2015..=2019, JournalChoice::All).apply(dataset.papers());
        let years: Vec<i32> = kept.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2015, 2019]);
    }

    #[test]
    fn journal_match_is_exact_and_case_sensitive() {
        let dataset = clean(sample_rows());

        let nature = Filter::new(2000..=2030, JournalChoice::from_selector("Nature")).apply(dataset.papers());
        assert_eq!(nature.len(), 2);
        assert!(nature.iter().all(|p| p.journal == "Nature"));

        let lower = Filter::new(2000..=2030, JournalChoice::from_selector("nature")).apply(dataset.papers());
        assert!(lower.is_empty());

        let prefix = Filter::new(2000..=2030, JournalChoice::from_selector("Nat")).apply(dataset.papers());
        assert!(prefix.is_empty());
    }

    #[test]
    fn year_and_journal_combine() {
        let dataset = clean(sample_rows());
        let kept = Filter::new(2003..=2003, JournalChoice::Only("Lancet".to_string())).apply(dataset.papers());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "SARS transmission in hospitals");
    }

    #[test]
    fn selector_sentinel_maps_to_all() {
        assert_eq!(JournalChoice::from_selector(ALL_JOURNALS), JournalChoice::All);
        assert_eq!(JournalChoice::from_selector("BMJ"), JournalChoice::Only("BMJ".to_string()));
    }

    #[test]
    fn journal_options_start_with_all() {
        let dataset = clean(sample_rows());
        assert_eq!(journal_options(&dataset), vec!["All", "Lancet", "Nature", "Unknown", "Virology"]);
    }

    #[test]
    fn empty_dataset_filter_matches_nothing() {
        let dataset = clean(Vec::new());
        let filter = Filter::everything(&dataset);
        assert!(filter.years.is_empty());
        assert!(filter.apply(dataset.papers()).is_empty());
    }
}
