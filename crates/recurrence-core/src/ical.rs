//! RFC 5545 RRULE text ↔ [`RecurrenceRule`], plus validation.
//!
//! Serialization produces the `FREQ=...;...` body of an RRULE property.
//! Validation hands that body, with a `DTSTART`, to the `rrule` crate's parser,
//! which checks the rule against RFC 5545. No occurrences are computed.

use crate::error::{RecurrenceError, Result};
use crate::rule::{RecurrenceRule, Weekday};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rrule::RRuleSet;
use tracing::{debug, trace};

const ICAL_DATETIME: &str = "%Y%m%dT%H%M%S";
const ICAL_DATE: &str = "%Y%m%d";

/// Serialize `rule` to an RRULE value, e.g. `"FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,FR"`.
///
/// `INTERVAL` is written only when it is not 1 and `COUNT` only when it is
/// non-zero. RFC 5545 forbids `COUNT` and `UNTIL` together, so `UNTIL` is
/// written only when there is no count. Empty constraints are omitted.
///
/// # Errors
/// Returns `RecurrenceError::MissingFrequency` if the rule has no frequency.
pub fn to_rrule_string(rule: &RecurrenceRule) -> Result<String> {
    let frequency = rule.frequency.ok_or(RecurrenceError::MissingFrequency)?;

    let mut parts = vec![format!("FREQ={}", frequency)];

    if rule.interval != 1 {
        parts.push(format!("INTERVAL={}", rule.interval));
    }
    if rule.count > 0 {
        parts.push(format!("COUNT={}", rule.count));
    }
    if let (0, Some(until)) = (rule.count, rule.until) {
        parts.push(format!("UNTIL={}", format_utc(until)));
    }
    if let Some(month) = rule.by_month {
        parts.push(format!("BYMONTH={}", month));
    }
    if let Some(year_days) = non_blank(&rule.by_year_day) {
        parts.push(format!("BYYEARDAY={}", year_days.replace(' ', "")));
    }
    if !rule.by_month_day.is_empty() {
        let days: Vec<String> = rule.by_month_day.iter().map(i8::to_string).collect();
        parts.push(format!("BYMONTHDAY={}", days.join(",")));
    }
    if !rule.by_weekday.is_empty() {
        let days: Vec<&str> = rule.by_weekday.iter().map(|d| d.as_str()).collect();
        parts.push(format!("BYDAY={}", days.join(",")));
    }
    if let Some(weeks) = non_blank(&rule.by_week_number) {
        parts.push(format!("BYWEEKNO={}", weeks.replace(' ', "")));
    }
    if let Some(position) = rule.by_set_position.filter(|p| *p != 0) {
        parts.push(format!("BYSETPOS={}", position));
    }

    Ok(parts.join(";"))
}

/// Parse RRULE text into a [`RecurrenceRule`].
///
/// Accepts a bare value (`"FREQ=DAILY;COUNT=3"`), an `RRULE:` property line,
/// and an optional `DTSTART:` line before it. Date-times without a trailing
/// `Z` are taken as UTC.
///
/// # Errors
/// Returns `RecurrenceError::InvalidRule` for unknown keys, malformed values,
/// more than one `BYMONTH`/`BYSETPOS` value, `BYSETPOS=0`, or ordinal `BYDAY`
/// entries such as `3TU` (use `BYSETPOS` instead). Empty `BYYEARDAY`/`BYWEEKNO`
/// values leave the field unset.
pub fn parse_rrule(text: &str) -> Result<RecurrenceRule> {
    let mut rule = RecurrenceRule::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.to_ascii_uppercase().starts_with("DTSTART") {
            let value = line.rsplit(':').next().unwrap_or_default();
            rule.start = Some(parse_ical_datetime(value)?);
            continue;
        }

        let body = strip_prefix_ignore_case(line, "RRULE:").unwrap_or(line);
        for pair in body.split(';').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                RecurrenceError::InvalidRule(format!("expected KEY=VALUE, got '{}'", pair))
            })?;
            apply_part(&mut rule, &key.trim().to_ascii_uppercase(), value.trim())?;
        }
    }

    debug!(freq = rule.frequency_str(), "parsed RRULE");
    Ok(rule)
}

/// Check `rule` against RFC 5545 using the `rrule` crate's parser.
///
/// When the rule has no `start`, `DTSTART` is the Unix epoch, or the rule's
/// `until` if that is earlier, so a start the caller never set cannot make
/// `UNTIL` look out of order.
///
/// # Errors
/// Returns `RecurrenceError::MissingFrequency` if the rule has no frequency and
/// `RecurrenceError::InvalidRule` for a zero interval or anything the `rrule`
/// crate rejects (e.g. an `UNTIL` before `DTSTART`).
pub fn validate(rule: &RecurrenceRule) -> Result<()> {
    if rule.interval == 0 {
        return Err(RecurrenceError::InvalidRule(
            "INTERVAL must be at least 1".to_string(),
        ));
    }

    let body = to_rrule_string(rule)?;
    let start = rule.start.unwrap_or_else(|| {
        let epoch = DateTime::<Utc>::UNIX_EPOCH;
        rule.until.map_or(epoch, |until| until.min(epoch))
    });
    let rrule_text = format!("DTSTART:{}\nRRULE:{}", format_utc(start), body);

    rrule_text.parse::<RRuleSet>().map_err(|e| {
        debug!(rrule = %body, error = %e, "RRULE rejected");
        RecurrenceError::InvalidRule(e.to_string())
    })?;

    trace!(rrule = %body, "RRULE accepted");
    Ok(())
}

fn apply_part(rule: &mut RecurrenceRule, key: &str, value: &str) -> Result<()> {
    match key {
        "FREQ" => rule.frequency = Some(value.parse()?),
        "INTERVAL" => rule.interval = parse_number(key, value)?,
        "COUNT" => rule.count = parse_number(key, value)?,
        "UNTIL" => rule.until = Some(parse_ical_datetime(value)?),
        "BYMONTH" => rule.by_month = Some(parse_number(key, value)?),
        "BYYEARDAY" => rule.by_year_day = Some(value.to_string()).filter(|v| !v.is_empty()),
        "BYMONTHDAY" => {
            rule.by_month_day = value
                .split(',')
                .map(|day| parse_number(key, day))
                .collect::<Result<_>>()?;
        }
        "BYDAY" => {
            rule.by_weekday = value
                .split(',')
                .map(|day| day.trim().parse::<Weekday>())
                .collect::<Result<_>>()?;
        }
        "BYWEEKNO" => rule.by_week_number = Some(value.to_string()).filter(|v| !v.is_empty()),
        "BYSETPOS" => match parse_number::<i32>(key, value)? {
            0 => {
                return Err(RecurrenceError::InvalidRule(
                    "BYSETPOS must not be 0".to_string(),
                ))
            }
            position => rule.by_set_position = Some(position),
        },
        // Week start only affects expansion, which this crate never does.
        "WKST" => trace!(wkst = value, "ignoring WKST"),
        other => {
            return Err(RecurrenceError::InvalidRule(format!(
                "unsupported RRULE part '{}'",
                other
            )))
        }
    }
    Ok(())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        RecurrenceError::InvalidRule(format!("{} value '{}' is not a valid number", key, value))
    })
}

/// Parse `YYYYMMDDTHHMMSS[Z]` or `YYYYMMDD` as UTC.
fn parse_ical_datetime(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim().trim_end_matches('Z');
    if let Ok(ndt) = NaiveDateTime::parse_from_str(value, ICAL_DATETIME) {
        return Ok(ndt.and_utc());
    }
    NaiveDate::parse_from_str(value, ICAL_DATE)
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc())
        .map_err(|e| RecurrenceError::InvalidRule(format!("invalid date-time '{}': {}", value, e)))
}

fn format_utc(dt: DateTime<Utc>) -> String {
    format!("{}Z", dt.format(ICAL_DATETIME))
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}
