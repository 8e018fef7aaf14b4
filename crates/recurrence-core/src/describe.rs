//! Rule → English sentence, in the style of the `toText` output JavaScript
//! RRULE libraries produce for recurring-event forms.
//!
//! The raw sentence uses full weekday/month names and "Oxford comma" lists
//! (`"Monday, Wednesday, and Friday"`). [`summarize`] runs it through
//! [`crate::text::normalize`] to get the compact form shown to users.

use crate::error::{RecurrenceError, Result};
use crate::rule::RecurrenceRule;
use crate::text;
use tracing::trace;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Describe `rule` as an English sentence with full names.
///
/// `by_set_position` reads as an ordinal weekday (`"on the 3rd Tuesday"`) when
/// weekdays are set; otherwise it is appended as `"taking the last match each
/// month"` after the other constraints. Empty `by_year_day`/`by_week_number`
/// lists are skipped.
///
/// # Errors
/// Returns `RecurrenceError::MissingFrequency` if the rule has no frequency,
/// and `RecurrenceError::InvalidRule` if `by_month` is outside 1–12 or
/// `by_year_day` contains a non-numeric entry.
pub fn describe(rule: &RecurrenceRule) -> Result<String> {
    let frequency = rule.frequency.ok_or(RecurrenceError::MissingFrequency)?;
    let set_position = rule.by_set_position.filter(|p| *p != 0);

    let mut parts: Vec<String> = vec!["every".to_string()];

    if rule.interval > 1 {
        parts.push(format!("{} {}s", rule.interval, frequency.unit()));
    } else {
        parts.push(frequency.unit().to_string());
    }

    if let Some(month) = rule.by_month {
        parts.push(format!("in {}", month_name(month)?));
    }

    if !rule.by_weekday.is_empty() {
        let names: Vec<String> = rule
            .by_weekday
            .iter()
            .map(|day| day.full_name().to_string())
            .collect();
        match set_position {
            Some(position) => {
                parts.push(format!("on the {} {}", ordinal(position), join_list(&names)))
            }
            None => parts.push(format!("on {}", join_list(&names))),
        }
    }

    if !rule.by_month_day.is_empty() {
        let days: Vec<String> = rule
            .by_month_day
            .iter()
            .map(|day| ordinal(i32::from(*day)))
            .collect();
        parts.push(format!("on the {}", join_list(&days)));
    }

    if let Some(year_days) = &rule.by_year_day {
        let days = split_numbers(year_days, "BYYEARDAY")?
            .into_iter()
            .map(ordinal)
            .collect::<Vec<_>>();
        if !days.is_empty() {
            parts.push(format!("on the {} day of the year", join_list(&days)));
        }
    }

    if let Some(weeks) = &rule.by_week_number {
        let weeks: Vec<String> = split_list(weeks).map(str::to_string).collect();
        if !weeks.is_empty() {
            let label = if weeks.len() > 1 { "weeks" } else { "week" };
            parts.push(format!("in {} {}", label, join_list(&weeks)));
        }
    }

    if let Some(position) = set_position.filter(|_| rule.by_weekday.is_empty()) {
        parts.push(format!(
            "taking the {} match each {}",
            ordinal(position),
            frequency.unit()
        ));
    }

    if rule.count > 0 {
        let label = if rule.count == 1 { "time" } else { "times" };
        parts.push(format!("for {} {}", rule.count, label));
    } else if let Some(until) = rule.until {
        parts.push(format!("until {}", until.format("%B %-d, %Y")));
    }

    let sentence = parts.join(" ");
    trace!(sentence = %sentence, "described recurrence rule");
    Ok(sentence)
}

/// [`describe`] followed by [`text::normalize`]: the string a form displays.
pub fn summarize(rule: &RecurrenceRule) -> Result<String> {
    describe(rule).map(|sentence| text::normalize(&sentence))
}

fn month_name(month: u8) -> Result<&'static str> {
    usize::from(month)
        .checked_sub(1)
        .and_then(|index| MONTH_NAMES.get(index))
        .copied()
        .ok_or_else(|| RecurrenceError::InvalidRule(format!("month {} is not in 1-12", month)))
}

/// `1` → `"1st"`, `-1` → `"last"`, `-2` → `"2nd last"`.
fn ordinal(n: i32) -> String {
    if n == -1 {
        return "last".to_string();
    }
    if n < 0 {
        return format!("{} last", ordinal(-n));
    }
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// `["a"]` → `"a"`, `["a", "b", "c"]` → `"a, b, and c"`.
fn join_list(items: &[String]) -> String {
    match items.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{}, and {}", rest.join(", "), last),
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn split_numbers(raw: &str, field: &str) -> Result<Vec<i32>> {
    split_list(raw)
        .map(|part| {
            part.parse::<i32>().map_err(|_| {
                RecurrenceError::InvalidRule(format!("{} entry '{}' is not a number", field, part))
            })
        })
        .collect()
}
