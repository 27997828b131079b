use super::{RawDate, normalize_year};

fn year_of(text: &str) -> Option<i32> {
    normalize_year(RawDate::Text(text))
}

#[test]
fn absent_values_have_no_year() {
    assert_eq!(normalize_year(RawDate::Missing), None);
    assert_eq!(normalize_year(RawDate::from(None)), None);
}

#[test]
fn numeric_values_have_no_year() {
    assert_eq!(normalize_year(RawDate::Numeric(2020.0)), None);
    assert_eq!(normalize_year(RawDate::Numeric(f64::NAN)), None);
}

#[test]
fn bare_years_are_taken_verbatim() {
    for year in [1850, 1999, 2020, 2021, 9999] {
        assert_eq!(year_of(&year.to_string()), Some(year), "bare year {year}");
    }
    assert_eq!(year_of("0042"), Some(42));
}

#[test]
fn four_characters_that_are_not_a_number_have_no_year() {
    // No fallback to the digit search once the four-character path fails.
    assert_eq!(year_of("n.d."), None);
    assert_eq!(year_of("abcd"), None);
    assert_eq!(year_of("20x0"), None);
}

#[test]
fn structured_dates_yield_their_year() {
    // Array of (expected_year, input)
    let cases: Vec<(i32, &str)> = vec![
        (2020, "2020-03-15"),
        (2020, " 2020-03-15 "),
        (2019, "2019/12/31"),
        (2019, "2019-12-31 23:59:59"),
        (2019, "2019-12-31T23:59:59.250"),
        (2021, "2021-01-05T08:00:00Z"),
        (2021, "2021-01-05T08:00:00+02:00"),
        (2003, "Tue, 1 Jul 2003 10:52:37 +0200"),
        (2020, "03/15/2020"),
        (2020, "15/03/2020"),
        (2018, "15.03.2018"),
        (2020, "2020 Mar 15"),
        (2021, "15 March 2021"),
        (2017, "March 5, 2017"),
        (2016, "2016 Apr"),
        (2015, "2015-07"),
    ];

    for (expected, input) in cases {
        assert_eq!(year_of(input), Some(expected), "input {input:?}");
    }
}

#[test]
fn month_and_year_text_yields_the_year() {
    assert_eq!(year_of("March 2020"), Some(2020));
    assert_eq!(year_of("Dec 1998"), Some(1998));
    assert_eq!(year_of("Mar 2020"), Some(2020));
    assert_eq!(year_of("Sept 2021"), Some(2021));
}

#[test]
fn short_year_readings_of_four_digit_years_are_rejected() {
    // chrono would happily read these with a one to three digit year.
    let cases: Vec<(i32, &str)> = vec![
        (1998, "Dec 1998"),
        (2020, "Mar 2020"),
        (2019, "Nov 2019"),
        (2003, "Jul 2003"),
    ];

    for (expected, input) in cases {
        assert_eq!(year_of(input), Some(expected), "input {input:?}");
    }
}

#[test]
fn two_digit_years_are_expanded() {
    // Array of (expected_year, input)
    let cases: Vec<(i32, &str)> = vec![
        (1999, "12/31/99"),
        (2020, "3/15/20"),
        (2020, "15/03/20"),
        (1985, "Jan 2, 85"),
        (2020, "March 15, 20"),
    ];

    for (expected, input) in cases {
        assert_eq!(year_of(input), Some(expected), "input {input:?}");
    }
}

#[test]
fn free_text_falls_back_to_first_four_digit_run() {
    assert_eq!(year_of("Published online in 2019, revised 2021"), Some(2019));
    assert_eq!(year_of("circa 1918 (pandemic)"), Some(1918));
    // First four digits of a longer run.
    assert_eq!(year_of("ref 123456"), Some(1234));
    // No plausibility check on the digit run.
    assert_eq!(year_of("9999-99-99"), Some(9999));
}

#[test]
fn text_without_a_year_has_no_year() {
    assert_eq!(year_of("no date info"), None);
    assert_eq!(year_of("Spring 20"), None);
    assert_eq!(year_of(""), None);
    assert_eq!(year_of("     "), None);
}
