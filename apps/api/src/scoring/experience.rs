use once_cell::sync::Lazy;
use regex::Regex;

/// A decimal number followed by whitespace and "year" ("3 years", "4.5 year").
static YEARS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+\.?\d*)\s+year").expect("years pattern is a valid regex")
});

/// Returns the largest "N years" figure asserted in the text, or 0.0.
///
/// Multiple mentions resolve to the maximum, never the first or the sum.
pub fn extract_experience(text: &str) -> f64 {
    let lower = text.to_lowercase();
    YEARS_PATTERN
        .captures_iter(&lower)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<f64>().ok())
        .filter(|years| years.is_finite())
        .fold(0.0, f64::max)
}
