//! Year normalization for raw publish-date fields.
//!
//! Publish dates in paper metadata come in every shape: bare years, ISO
//! dates, timestamps, `"2020 Mar 15"`, or free text that merely mentions a
//! year. [`normalize_year`] reduces all of them to a single `i32` year or
//! `None`. It never fails: anything it cannot read is reported through
//! `tracing` at `debug` level and degrades to `None`.
//!
//! Resolution order:
//!
//! 1. missing or non-text values have no year;
//! 2. a value of exactly four characters is read as the year itself;
//! 3. otherwise the trimmed text is tried against a set of structured
//!    date / date-time layouts whose year is written out in four digits;
//! 4. then against the common two-digit-year layouts (`"12/31/99"`);
//! 5. failing that, the first four consecutive ASCII digits are the year.
//!
//! No plausibility range is applied: `"0042"` and `"9999"` are years too.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use std::fmt;
use tracing::debug;

#[cfg(test)]
mod tests;

/// A raw publish-date cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawDate<'a> {
    /// Empty cell or NA marker.
    Missing,
    Text(&'a str),
    /// A value that was already typed as a number upstream.
    Numeric(f64),
}

impl<'a> From<Option<&'a str>> for RawDate<'a> {
    fn from(value: Option<&'a str>) -> Self {
        match value {
            Some(text) => RawDate::Text(text),
            None => RawDate::Missing,
        }
    }
}

/// Date-time layouts, tried before the date-only ones. `%.f` makes the
/// fractional part optional.
const DATE_TIME_FORMATS: &[&str] =
    &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%Y %b %d",
    "%Y %B %d",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%b %d %Y",
];

/// Layouts without a day. chrono needs a full date, so the first of the month
/// is appended before parsing.
const MONTH_FORMATS: &[&str] = &["%Y-%m", "%Y %b", "%Y %B", "%B %Y", "%b %Y"];

/// Layouts with a two-digit year, tried after every four-digit one. chrono
/// maps `00..=69` to the 2000s and `70..=99` to the 1900s.
const TWO_DIGIT_YEAR_FORMATS: &[&str] = &["%m/%d/%y", "%d/%m/%y", "%b %d, %y", "%B %d, %y"];

/// Why a present value produced no year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unreadable {
    /// Four characters that are not an integer (e.g. `"n.d."`).
    BareYearNotNumeric,
    /// Neither a known layout nor any run of four digits.
    NoYearFound,
}

impl fmt::Display for Unreadable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unreadable::BareYearNotNumeric => f.write_str("four-character value is not an integer"),
            Unreadable::NoYearFound => f.write_str("no date layout matched and no four-digit run found"),
        }
    }
}

/// Extract a publication year from a raw publish-date value.
///
/// # Example
/// ```
/// use cordex::{RawDate, normalize_year};
///
/// assert_eq!(normalize_year(RawDate::Text("2020-03-15")), Some(2020));
/// assert_eq!(normalize_year(RawDate::Text("March 2020")), Some(2020));
/// assert_eq!(normalize_year(RawDate::Text("no date info")), None);
/// assert_eq!(normalize_year(RawDate::Missing), None);
/// ```
pub fn normalize_year(raw: RawDate<'_>) -> Option<i32> {
    let text = match raw {
        RawDate::Missing => return None,
        RawDate::Numeric(value) => {
            debug!(value, "publish date is not text, no year assigned");
            return None;
        }
        RawDate::Text(text) => text,
    };

    match extract_year(text) {
        Ok(year) => Some(year),
        Err(reason) => {
            debug!(raw = text, %reason, "publish date suppressed");
            None
        }
    }
}

fn extract_year(text: &str) -> Result<i32, Unreadable> {
    if text.chars().count() == 4 {
        return text.trim().parse::<i32>().map_err(|_| Unreadable::BareYearNotNumeric);
    }

    let trimmed = text.trim();
    if let Some(year) = structured_year(trimmed) {
        return Ok(year);
    }

    first_year_run(trimmed).ok_or(Unreadable::NoYearFound)
}

/// Year of `text` when it matches one of the known date layouts.
fn structured_year(text: &str) -> Option<i32> {
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.year());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.year());
    }

    let from_datetime = DATE_TIME_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(text, fmt).ok().map(|dt| dt.year()).filter(|y| in_full(text, *y))
    });
    if from_datetime.is_some() {
        return from_datetime;
    }

    let from_date = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok().map(|d| d.year()).filter(|y| in_full(text, *y)));
    if from_date.is_some() {
        return from_date;
    }

    let padded = format!("{text} 1");
    let from_month = MONTH_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(&padded, &format!("{fmt} %d")).ok().map(|d| d.year()).filter(|y| in_full(text, *y))
    });
    if from_month.is_some() {
        return from_month;
    }

    TWO_DIGIT_YEAR_FORMATS.iter().find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok()).map(|d| d.year())
}

/// `%Y` also accepts one to three digits, and a layout space may match no
/// space at all, so `"Dec 1998"` reads as day 19 of year 98 under `%b %d %Y`.
/// A parsed year only counts when `text` spells it as a four-digit number.
fn in_full(text: &str, year: i32) -> bool {
    regex!(r"[0-9]+").find_iter(text).any(|m| m.as_str().len() == 4 && m.as_str().parse() == Ok(year))
}

/// First four consecutive digits anywhere in `text`, read as a year.
fn first_year_run(text: &str) -> Option<i32> {
    regex!(r"[0-9]{4}").find(text).and_then(|m| m.as_str().parse().ok())
}
