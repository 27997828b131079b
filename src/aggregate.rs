//! Descriptive aggregations over a filtered view.
//!
//! All functions take `&[&Paper]` (the output of [`Filter::apply`](crate::Filter::apply))
//! and return small owned summaries ready for rendering.

use crate::Paper;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Words ignored when building the title word list. Common English function
/// words plus a few that dominate paper titles without saying anything.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "below", "between", "both", "but", "by", "can", "could", "did", "do",
    "does", "doing", "down", "during", "each", "else", "ever", "few", "for", "from", "further", "get", "had", "has",
    "have", "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if",
    "in", "into", "is", "it", "its", "itself", "just", "like", "me", "more", "most", "my", "myself", "no", "nor", "not",
    "of", "off", "on", "once", "only", "or", "other", "otherwise", "ought", "our", "ours", "ourselves", "out", "over",
    "own", "same", "shall", "she", "should", "since", "so", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "therefore", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "via", "was", "we", "were", "what", "when", "where", "which", "while", "who",
    "whom", "why", "with", "would", "you", "your", "yours", "yourself", "yourselves",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalCount {
    pub journal: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Publication counts per year, ascending by year.
pub fn year_counts(papers: &[&Paper]) -> Vec<YearCount> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for paper in papers {
        *counts.entry(paper.year).or_default() += 1;
    }
    counts.into_iter().map(|(year, count)| YearCount { year, count }).collect()
}

/// The `n` journals with the most papers, descending by count.
///
/// Equal counts are ordered by journal name so the result does not depend on
/// input order.
pub fn top_journals(papers: &[&Paper], n: usize) -> Vec<JournalCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for paper in papers {
        *counts.entry(paper.journal.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(n);

    ranked.into_iter().map(|(journal, count)| JournalCount { journal: journal.to_string(), count }).collect()
}

/// All non-blank titles joined with single spaces: the word-cloud input.
pub fn title_corpus(papers: &[&Paper]) -> String {
    papers.iter().map(|p| p.title.as_str()).filter(|t| !t.trim().is_empty()).collect::<Vec<_>>().join(" ")
}

/// Most frequent meaningful words in the titles, at most `limit` of them.
///
/// Words are lowercased; stop words, bare numbers and single characters are
/// skipped, and a trailing possessive `'s` is dropped. Sorted by count
/// descending, then alphabetically.
pub fn title_word_frequencies(papers: &[&Paper], limit: usize) -> Vec<WordCount> {
    let corpus = title_corpus(papers);
    let mut counts: HashMap<String, usize> = HashMap::new();

    for token in regex!(r"\w[\w']*").find_iter(&corpus) {
        let lowered = token.as_str().to_lowercase();
        let word = lowered.strip_suffix("'s").unwrap_or(&lowered).trim_end_matches('\'');

        if word.chars().count() < 2 || word.chars().all(|c| c.is_numeric()) || STOP_WORDS.contains(&word) {
            continue;
        }
        *counts.entry(word.to_string()).or_default() += 1;
    }

    let mut ranked: Vec<WordCount> = counts.into_iter().map(|(word, count)| WordCount { word, count }).collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    ranked.truncate(limit);
    ranked
}

/// One equal-width bucket of a [`Histogram`]. The range is `[start, end)`,
/// except for the last bucket which also includes `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width histogram over the observed range of the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    /// Number of values bucketed. Equal to the sum of all bin counts.
    pub total: usize,
}

impl Histogram {
    /// Bucket `values` into `bins` equal-width buckets spanning `[min, max]`.
    ///
    /// No values (or zero bins) gives an empty histogram. When every value is
    /// identical the buckets span `[v - 0.5, v + 0.5]`.
    pub fn build(values: &[usize], bins: usize) -> Self {
        let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
            return Histogram { bins: Vec::new(), total: 0 };
        };
        if bins == 0 {
            return Histogram { bins: Vec::new(), total: 0 };
        }

        let (lo, hi) = if min == max { (min as f64 - 0.5, max as f64 + 0.5) } else { (min as f64, max as f64) };
        let width = (hi - lo) / bins as f64;

        let mut out: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin { start: lo + width * i as f64, end: lo + width * (i + 1) as f64, count: 0 })
            .collect();
        // Pin the last edge so float drift cannot push `max` out of range.
        if let Some(last) = out.last_mut() {
            last.end = hi;
        }

        for &value in values {
            let offset = ((value as f64 - lo) / width).floor();
            let idx = if offset < 0.0 { 0 } else { (offset as usize).min(bins - 1) };
            out[idx].count += 1;
        }

        Histogram { bins: out, total: values.len() }
    }

    /// Buckets that overlap the display window `[lo, hi]`. Presentation only:
    /// the histogram itself keeps every bucket.
    pub fn window(&self, lo: f64, hi: f64) -> Vec<HistogramBin> {
        self.bins.iter().copied().filter(|b| b.end > lo && b.start <= hi).collect()
    }

    /// Largest bucket count, 0 for an empty histogram.
    pub fn peak(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}
