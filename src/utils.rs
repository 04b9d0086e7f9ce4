//! Small text helpers shared by the fetcher and parser.

use once_cell::sync::Lazy;
use regex::Regex;

static FIRST_INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

/// Parse the first run of ASCII digits in `text`.
///
/// Listing metadata renders counts as `"150 points"` or `"25\u{a0}comments"`,
/// so the number is pulled out rather than split on whitespace.
///
/// # Returns
///
/// `None` when there are no digits or the number overflows a `u32`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(first_integer("150 points"), Some(150));
/// assert_eq!(first_integer("discuss"), None);
/// ```
pub fn first_integer(text: &str) -> Option<u32> {
    FIRST_INTEGER
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

/// Collapse whitespace runs (including non-breaking spaces) into single spaces
/// and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split(|c: char| c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` bytes (backing off to a char boundary) with
/// an ellipsis and the number of dropped bytes appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}
