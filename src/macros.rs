/// Compile a regex literal once and hand out a `&'static Regex`.
///
/// Patterns are literals checked by the test suite, so a bad pattern is a
/// programming error rather than a runtime condition.
#[macro_export]
macro_rules! regex {
    ($pat:literal $(,)?) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).expect(concat!("invalid regex: ", $pat)));
        &*RE
    }};
}
