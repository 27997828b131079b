use crate::aggregate::{self, Histogram, JournalCount, WordCount, YearCount};
use crate::{Dataset, Filter, Paper};
use serde::Serialize;
use tracing::debug;

bitflags::bitflags! {
    /// Dashboard panels to compute. The overview and filtered count are always
    /// present.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Panels: u8 {
        const YEARS       = 1 << 0;
        const JOURNALS    = 1 << 1;
        const TITLE_WORDS = 1 << 2;
        const ABSTRACTS   = 1 << 3;
        const SAMPLE      = 1 << 4;
    }
}

impl Panels {
    /// Parse a single panel name as used on the command line.
    pub fn from_cli_name(name: &str) -> Option<Panels> {
        match name.trim().to_ascii_lowercase().as_str() {
            "years" => Some(Panels::YEARS),
            "journals" => Some(Panels::JOURNALS),
            "words" | "wordcloud" => Some(Panels::TITLE_WORDS),
            "abstracts" => Some(Panels::ABSTRACTS),
            "sample" => Some(Panels::SAMPLE),
            "all" => Some(Panels::all()),
            _ => None,
        }
    }
}

impl Default for Panels {
    fn default() -> Self {
        Panels::all()
    }
}

/// Knobs for [`explore`].
#[derive(Debug, Clone)]
pub struct Options {
    pub panels: Panels,
    /// Journals shown in the top-journals chart.
    pub top_journals: usize,
    /// Words kept for the title word list.
    pub title_words: usize,
    pub histogram_bins: usize,
    /// Display window of the abstract word-count chart.
    pub histogram_window: (f64, f64),
    /// Rows in the preview table.
    pub sample_rows: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            panels: Panels::default(),
            top_journals: 10,
            title_words: 40,
            histogram_bins: 50,
            histogram_window: (0.0, 500.0),
            sample_rows: 10,
        }
    }
}

/// Headline metrics over the whole cleaned dataset (not the filtered view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub total_papers: usize,
    /// `(min, max)` year, `None` for an empty dataset.
    pub year_span: Option<(i32, i32)>,
    pub unique_journals: usize,
}

/// One line of the preview table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleRow {
    pub title: String,
    pub authors: String,
    pub journal: String,
    pub year: i32,
}

impl From<&Paper> for SampleRow {
    fn from(paper: &Paper) -> Self {
        SampleRow {
            title: paper.title.clone(),
            authors: paper.authors.clone(),
            journal: paper.journal.clone(),
            year: paper.year,
        }
    }
}

/// Everything one dashboard render needs.
///
/// Panels not requested in [`Options::panels`] are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub overview: Overview,
    /// Number of papers left after filtering.
    pub filtered: usize,
    pub year_counts: Option<Vec<YearCount>>,
    pub top_journals: Option<Vec<JournalCount>>,
    pub title_words: Option<Vec<WordCount>>,
    pub abstract_histogram: Option<Histogram>,
    /// Display window to apply to `abstract_histogram`.
    pub histogram_window: (f64, f64),
    pub sample: Option<Vec<SampleRow>>,
}

/// Filter `dataset` and compute the requested panels.
///
/// This is one "rerun" of the dashboard: cheap, side-effect free, and safe to
/// call as often as the filter changes.
///
/// # Example
/// ```
/// use cordex::{Filter, Options, RawRecord, clean, explore};
///
/// let dataset = clean(vec![RawRecord {
///     title: Some("Coronavirus spike protein".to_string()),
///     publish_time: Some("2020-03-15".to_string()),
///     ..RawRecord::default()
/// }]);
/// let view = explore(&dataset, &Filter::everything(&dataset), &Options::default());
/// assert_eq!(view.filtered, 1);
/// assert_eq!(view.overview.year_span, Some((2020, 2020)));
/// ```
pub fn explore(dataset: &Dataset, filter: &Filter, options: &Options) -> Dashboard {
    let view = filter.apply(dataset.papers());
    debug!("Filter applied - years={:?}, journal={:?}, kept={}", filter.years, filter.journal, view.len());

    let panels = options.panels;
    let overview = Overview {
        total_papers: dataset.len(),
        year_span: dataset.year_bounds(),
        unique_journals: dataset.journal_count(),
    };

    let abstract_histogram = panels.contains(Panels::ABSTRACTS).then(|| {
        let counts: Vec<usize> = view.iter().map(|p| p.abstract_word_count).collect();
        Histogram::build(&counts, options.histogram_bins)
    });

    Dashboard {
        overview,
        filtered: view.len(),
        year_counts: panels.contains(Panels::YEARS).then(|| aggregate::year_counts(&view)),
        top_journals: panels.contains(Panels::JOURNALS).then(|| aggregate::top_journals(&view, options.top_journals)),
        title_words: panels
            .contains(Panels::TITLE_WORDS)
            .then(|| aggregate::title_word_frequencies(&view, options.title_words)),
        abstract_histogram,
        histogram_window: options.histogram_window,
        sample: panels
            .contains(Panels::SAMPLE)
            .then(|| view.iter().take(options.sample_rows).map(|p| SampleRow::from(*p)).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::sample_rows;
    use crate::{JournalChoice, clean};

    #[test]
    fn explore_fills_every_panel_by_default() {
        let dataset = clean(sample_rows());
        let dash = explore(&dataset, &Filter::everything(&dataset), &Options::default());

        assert_eq!(dash.overview, Overview { total_papers: 5, year_span: Some((2003, 2020)), unique_journals: 4 });
        assert_eq!(dash.filtered, 5);
        assert_eq!(dash.year_counts.as_ref().map(Vec::len), Some(4));
        assert_eq!(dash.top_journals.as_ref().and_then(|t| t.first()).map(|j| j.journal.as_str()), Some("Nature"));
        assert!(dash.title_words.as_ref().is_some_and(|w| w.iter().any(|w| w.word == "coronavirus")));
        assert_eq!(dash.abstract_histogram.as_ref().map(|h| h.total), Some(5));
        assert_eq!(dash.sample.as_ref().map(Vec::len), Some(5));
    }

    #[test]
    fn overview_ignores_the_filter() {
        let dataset = clean(sample_rows());
        let filter = Filter::new(2019..=2019, JournalChoice::Only("Virology".to_string()));
        let dash = explore(&dataset, &filter, &Options::default());

        assert_eq!(dash.overview.total_papers, 5);
        assert_eq!(dash.filtered, 1);
        assert_eq!(dash.sample.unwrap()[0].title, "Bat coronavirus reservoirs");
    }

    #[test]
    fn only_requested_panels_are_computed() {
        let dataset = clean(sample_rows());
        let options = Options { panels: Panels::YEARS | Panels::SAMPLE, sample_rows: 2, ..Options::default() };
        let dash = explore(&dataset, &Filter::everything(&dataset), &options);

        assert!(dash.year_counts.is_some());
        assert!(dash.top_journals.is_none());
        assert!(dash.title_words.is_none());
        assert!(dash.abstract_histogram.is_none());
        assert_eq!(dash.sample.map(|s| s.len()), Some(2));
    }

    #[test]
    fn panel_names_parse() {
        assert_eq!(Panels::from_cli_name("years"), Some(Panels::YEARS));
        assert_eq!(Panels::from_cli_name(" Words "), Some(Panels::TITLE_WORDS));
        assert_eq!(Panels::from_cli_name("all"), Some(Panels::all()));
        assert_eq!(Panels::from_cli_name("pie"), None);
    }
}
