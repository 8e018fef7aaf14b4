//! The recurrence rule value type bound to a recurring-event form.
//!
//! A [`RecurrenceRule`] is a plain bag of independent constraints layered on
//! top of `frequency` + `interval`. Nothing here checks that the constraints
//! make sense together; see [`crate::ical::validate`] for that.
//!
//! On the wire (JSON) the rule uses the RRULE-style names a JavaScript form
//! works with: `dtstart`, `freq`, `bymonthday`, `byweekday`, and so on.

use crate::error::{RecurrenceError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// How often the rule repeats, in units of `interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ];

    /// The RRULE `FREQ` token, e.g. `"WEEKLY"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
        }
    }

    /// Singular English unit used in descriptions ("day", "week", ...).
    pub fn unit(self) -> &'static str {
        match self {
            Frequency::Daily => "day",
            Frequency::Weekly => "week",
            Frequency::Monthly => "month",
            Frequency::Yearly => "year",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "DAILY" => Ok(Frequency::Daily),
            "WEEKLY" => Ok(Frequency::Weekly),
            "MONTHLY" => Ok(Frequency::Monthly),
            "YEARLY" => Ok(Frequency::Yearly),
            _ => Err(RecurrenceError::InvalidRule(format!(
                "unknown frequency '{}'",
                s
            ))),
        }
    }
}

/// A weekday token as used in `BYDAY` (`MO`, `TU`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "MO")]
    Monday,
    #[serde(rename = "TU")]
    Tuesday,
    #[serde(rename = "WE")]
    Wednesday,
    #[serde(rename = "TH")]
    Thursday,
    #[serde(rename = "FR")]
    Friday,
    #[serde(rename = "SA")]
    Saturday,
    #[serde(rename = "SU")]
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Two-letter RRULE token.
    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "MO",
            Weekday::Tuesday => "TU",
            Weekday::Wednesday => "WE",
            Weekday::Thursday => "TH",
            Weekday::Friday => "FR",
            Weekday::Saturday => "SA",
            Weekday::Sunday => "SU",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.to_ascii_uppercase();
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str() == upper)
            .ok_or_else(|| RecurrenceError::InvalidRule(format!("unknown weekday '{}'", s)))
    }
}

/// A recurrence pattern: frequency, interval, bounds and BYxxx constraints.
///
/// `count == 0` means no occurrence limit. `count` and `until` are both
/// optional bounds; when neither is set the rule never ends.
///
/// Only serialized directly; reading JSON goes through [`RuleInit`] (see
/// [`RecurrenceRule::from_json`]) so partial objects get the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecurrenceRule {
    #[serde(rename = "dtstart", skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<DateTime<Utc>>,

    /// Unset is written as `""` on the wire.
    #[serde(rename = "freq", serialize_with = "wire::frequency::serialize")]
    pub frequency: Option<Frequency>,

    pub interval: u32,

    pub count: u32,

    #[serde(rename = "bymonth", skip_serializing_if = "Option::is_none")]
    pub by_month: Option<u8>,

    /// Comma list, kept as text (e.g. `"1,100,-1"`).
    #[serde(rename = "byyearday", skip_serializing_if = "wire::is_blank")]
    pub by_year_day: Option<String>,

    /// Negative values count from the end of the month.
    #[serde(rename = "bymonthday")]
    pub by_month_day: Vec<i8>,

    #[serde(rename = "byweekday")]
    pub by_weekday: Vec<Weekday>,

    #[serde(rename = "byweekno", skip_serializing_if = "wire::is_blank")]
    pub by_week_number: Option<String>,

    /// `0` on the wire means unset, so `Some(0)` is not written.
    #[serde(rename = "bysetpos", skip_serializing_if = "wire::is_unset_position")]
    pub by_set_position: Option<i32>,
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        Self {
            start: None,
            until: None,
            frequency: None,
            interval: 1,
            count: 0,
            by_month: None,
            by_year_day: None,
            by_month_day: Vec::new(),
            by_weekday: Vec::new(),
            by_week_number: None,
            by_set_position: None,
        }
    }
}

/// Partial initializer for [`RecurrenceRule::create`].
///
/// Every field that is `Some` replaces the corresponding default outright.
/// Sequences are replaced, not merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuleInit {
    #[serde(rename = "dtstart")]
    pub start: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    #[serde(rename = "freq", deserialize_with = "wire::frequency::deserialize")]
    pub frequency: Option<Frequency>,
    pub interval: Option<u32>,
    pub count: Option<u32>,
    #[serde(rename = "bymonth")]
    pub by_month: Option<u8>,
    #[serde(rename = "byyearday", deserialize_with = "wire::empty_as_none")]
    pub by_year_day: Option<String>,
    #[serde(rename = "bymonthday")]
    pub by_month_day: Option<Vec<i8>>,
    #[serde(rename = "byweekday")]
    pub by_weekday: Option<Vec<Weekday>>,
    #[serde(rename = "byweekno", deserialize_with = "wire::empty_as_none")]
    pub by_week_number: Option<String>,
    #[serde(rename = "bysetpos", deserialize_with = "wire::zero_as_none")]
    pub by_set_position: Option<i32>,
}

impl RecurrenceRule {
    /// A rule with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rule from defaults, overwritten by whatever `init` supplies.
    pub fn create(init: Option<RuleInit>) -> Self {
        let mut rule = Self::new();
        if let Some(init) = init {
            rule.apply(init);
        }
        debug!(freq = rule.frequency_str(), interval = rule.interval, "created recurrence rule");
        rule
    }

    /// Shallow overwrite: each `Some` field of `init` replaces the current value.
    pub fn apply(&mut self, init: RuleInit) {
        if init.start.is_some() {
            self.start = init.start;
        }
        if init.until.is_some() {
            self.until = init.until;
        }
        if init.frequency.is_some() {
            self.frequency = init.frequency;
        }
        if let Some(interval) = init.interval {
            self.interval = interval;
        }
        if let Some(count) = init.count {
            self.count = count;
        }
        if init.by_month.is_some() {
            self.by_month = init.by_month;
        }
        if init.by_year_day.is_some() {
            self.by_year_day = init.by_year_day;
        }
        if let Some(days) = init.by_month_day {
            self.by_month_day = days;
        }
        if let Some(days) = init.by_weekday {
            self.by_weekday = days;
        }
        if init.by_week_number.is_some() {
            self.by_week_number = init.by_week_number;
        }
        if init.by_set_position.is_some() {
            self.by_set_position = init.by_set_position;
        }
    }

    /// Parse a (possibly partial) JSON object using the wire field names.
    pub fn from_json(json: &str) -> Result<Self> {
        let init: RuleInit = serde_json::from_str(json)?;
        Ok(Self::create(Some(init)))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The frequency token, or `""` when unset.
    pub fn frequency_str(&self) -> &'static str {
        self.frequency.map(Frequency::as_str).unwrap_or("")
    }
}

/// Serde adapters for the JavaScript form's conventions for "unset".
mod wire {
    use serde::{Deserialize, Deserializer};

    pub(super) mod frequency {
        use crate::rule::Frequency;
        use serde::de::Error as _;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<Frequency>,
            serializer: S,
        ) -> std::result::Result<S::Ok, S::Error> {
            serializer.serialize_str(value.map(Frequency::as_str).unwrap_or(""))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> std::result::Result<Option<Frequency>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            match raw.as_deref() {
                None | Some("") => Ok(None),
                Some(s) => s.parse().map(Some).map_err(D::Error::custom),
            }
        }
    }

    pub(super) fn empty_as_none<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<String>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.filter(|s| !s.is_empty()))
    }

    pub(super) fn zero_as_none<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<i32>, D::Error> {
        let raw: Option<i32> = Option::deserialize(deserializer)?;
        Ok(raw.filter(|n| *n != 0))
    }

    pub(super) fn is_blank(value: &Option<String>) -> bool {
        value.as_deref().is_none_or(str::is_empty)
    }

    pub(super) fn is_unset_position(value: &Option<i32>) -> bool {
        matches!(value, None | Some(0))
    }
}
