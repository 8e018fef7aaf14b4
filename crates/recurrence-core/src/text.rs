//! Text normalization for generated rule descriptions.
//!
//! The description generator produces full English names and "Oxford comma"
//! lists. Before display, weekday and month names are shortened to their
//! three-letter forms and awkward "and" phrasing is cleaned up.
//!
//! Matching is literal and case-sensitive with **no word-boundary guard**: a
//! full name embedded in a longer token is replaced as well, e.g.
//! `"Mondays"` becomes `"Mons"`. The same holds for the conjunction patterns.

use regex::Regex;
use std::sync::LazyLock;

/// Full weekday name → three-letter abbreviation.
pub const WEEKDAY_ABBREVIATIONS: &[(&str, &str)] = &[
    ("Monday", "Mon"),
    ("Tuesday", "Tue"),
    ("Wednesday", "Wed"),
    ("Thursday", "Thu"),
    ("Friday", "Fri"),
    ("Saturday", "Sat"),
    ("Sunday", "Sun"),
];

/// Full month name → three-letter abbreviation. `May` maps to itself.
pub const MONTH_ABBREVIATIONS: &[(&str, &str)] = &[
    ("January", "Jan"),
    ("February", "Feb"),
    ("March", "Mar"),
    ("April", "Apr"),
    ("May", "May"),
    ("June", "Jun"),
    ("July", "Jul"),
    ("August", "Aug"),
    ("September", "Sep"),
    ("October", "Oct"),
    ("November", "Nov"),
    ("December", "Dec"),
];

static DUPLICATE_AND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"and\s+and").expect("static pattern is valid"));

static COMMA_AND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*and").expect("static pattern is valid"));

/// Apply every `(from, to)` pair of `table` to `text`, replacing all occurrences.
fn replace_all(text: &str, table: &[(&str, &str)]) -> String {
    table
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Replace every full weekday name (`Monday`…`Sunday`) with its abbreviation.
///
/// ```rust
/// use recurrence_core::abbreviate_weekdays;
///
/// assert_eq!(abbreviate_weekdays("on Monday and Friday"), "on Mon and Fri");
/// ```
pub fn abbreviate_weekdays(text: &str) -> String {
    replace_all(text, WEEKDAY_ABBREVIATIONS)
}

/// Replace every full month name (`January`…`December`) with its abbreviation.
pub fn abbreviate_months(text: &str) -> String {
    replace_all(text, MONTH_ABBREVIATIONS)
}

/// Tidy the "and" phrasing of a generated sentence.
///
/// 1. `and` + whitespace + `and` collapses to a single `and`. Matches are
///    found left to right without overlap, so `"and and and"` becomes
///    `"and and"`.
/// 2. A comma directly before `and` (optionally separated by whitespace) is
///    dropped, leaving a single space: `"Mon, Tue, and Wed"` → `"Mon, Tue and Wed"`.
pub fn cleanup_conjunctions(text: &str) -> String {
    let collapsed = DUPLICATE_AND.replace_all(text, "and");
    COMMA_AND.replace_all(&collapsed, " and").into_owned()
}

/// The full post-processing applied to a description before display:
/// weekdays, then months, then conjunctions.
pub fn normalize(text: &str) -> String {
    cleanup_conjunctions(&abbreviate_months(&abbreviate_weekdays(text)))
}
