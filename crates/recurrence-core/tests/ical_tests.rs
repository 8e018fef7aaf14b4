//! Tests for RRULE text serialization, parsing and validation.

use chrono::{TimeZone, Utc};
use recurrence_core::{
    parse_rrule, to_rrule_string, validate, Frequency, RecurrenceError, RecurrenceRule, Weekday,
};

fn weekly_mwf() -> RecurrenceRule {
    RecurrenceRule {
        start: Some(Utc.with_ymd_and_hms(2026, 2, 16, 9, 0, 0).unwrap()),
        frequency: Some(Frequency::Weekly),
        interval: 2,
        count: 10,
        by_weekday: vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday],
        ..RecurrenceRule::default()
    }
}

// ---------------------------------------------------------------------------
// to_rrule_string
// ---------------------------------------------------------------------------

#[test]
fn minimal_rule_has_only_freq() {
    let rule = RecurrenceRule {
        frequency: Some(Frequency::Daily),
        ..RecurrenceRule::default()
    };
    assert_eq!(to_rrule_string(&rule).unwrap(), "FREQ=DAILY");
}

#[test]
fn weekly_rule_serializes_in_canonical_order() {
    assert_eq!(
        to_rrule_string(&weekly_mwf()).unwrap(),
        "FREQ=WEEKLY;INTERVAL=2;COUNT=10;BYDAY=MO,WE,FR"
    );
}

#[test]
fn all_constraints_are_written() {
    let rule = RecurrenceRule {
        frequency: Some(Frequency::Yearly),
        until: Some(Utc.with_ymd_and_hms(2027, 12, 31, 23, 59, 59).unwrap()),
        by_month: Some(3),
        by_year_day: Some("1, 100".to_string()),
        by_month_day: vec![1, -1],
        by_weekday: vec![Weekday::Sunday],
        by_week_number: Some("20".to_string()),
        by_set_position: Some(-1),
        ..RecurrenceRule::default()
    };

    assert_eq!(
        to_rrule_string(&rule).unwrap(),
        "FREQ=YEARLY;UNTIL=20271231T235959Z;BYMONTH=3;BYYEARDAY=1,100;BYMONTHDAY=1,-1;BYDAY=SU;BYWEEKNO=20;BYSETPOS=-1"
    );
}

#[test]
fn missing_frequency_cannot_be_serialized() {
    let err = to_rrule_string(&RecurrenceRule::new()).unwrap_err();
    assert!(matches!(err, RecurrenceError::MissingFrequency));
}

// ---------------------------------------------------------------------------
// parse_rrule
// ---------------------------------------------------------------------------

#[test]
fn parse_bare_value() {
    let rule = parse_rrule("FREQ=MONTHLY;BYDAY=TU;BYSETPOS=3").unwrap();

    assert_eq!(rule.frequency, Some(Frequency::Monthly));
    assert_eq!(rule.by_weekday, vec![Weekday::Tuesday]);
    assert_eq!(rule.by_set_position, Some(3));
    assert_eq!(rule.interval, 1);
}

#[test]
fn parse_with_dtstart_and_property_prefix() {
    let rule = parse_rrule("DTSTART:20260216T090000Z\nRRULE:FREQ=WEEKLY;INTERVAL=2;COUNT=10;BYDAY=MO,WE,FR")
        .unwrap();
    assert_eq!(rule, weekly_mwf());
}

#[test]
fn parse_dtstart_with_tzid_keeps_wall_time() {
    let rule = parse_rrule("DTSTART;TZID=America/New_York:20260216T090000\nRRULE:FREQ=DAILY").unwrap();
    assert_eq!(rule.start, Some(Utc.with_ymd_and_hms(2026, 2, 16, 9, 0, 0).unwrap()));
}

#[test]
fn parse_date_only_until() {
    let rule = parse_rrule("FREQ=DAILY;UNTIL=20261231").unwrap();
    assert_eq!(rule.until, Some(Utc.with_ymd_and_hms(2026, 12, 31, 0, 0, 0).unwrap()));
}

#[test]
fn parse_is_case_insensitive_for_keys() {
    let rule = parse_rrule("rrule:freq=daily;count=3").unwrap();
    assert_eq!(rule.frequency, Some(Frequency::Daily));
    assert_eq!(rule.count, 3);
}

#[test]
fn parse_ignores_week_start() {
    let rule = parse_rrule("FREQ=WEEKLY;WKST=SU").unwrap();
    assert_eq!(rule.frequency, Some(Frequency::Weekly));
}

#[test]
fn parse_rejects_bad_input() {
    let bad = [
        "FREQ=HOURLY",
        "FREQ=DAILY;COLOR=RED",
        "FREQ=DAILY;COUNT=many",
        "FREQ=DAILY;BYMONTH=1,2",
        "FREQ=MONTHLY;BYDAY=3TU",
        "FREQ=DAILY;UNTIL=tomorrow",
        "FREQ",
    ];
    for text in bad {
        let err = parse_rrule(text).unwrap_err();
        assert!(
            matches!(err, RecurrenceError::InvalidRule(_)),
            "{} should be rejected, got {:?}",
            text,
            err
        );
    }
}

#[test]
fn serialize_then_parse_preserves_rule() {
    let rule = RecurrenceRule {
        frequency: Some(Frequency::Monthly),
        until: Some(Utc.with_ymd_and_hms(2027, 6, 30, 0, 0, 0).unwrap()),
        by_month_day: vec![1, 15, -1],
        ..RecurrenceRule::default()
    };
    let back = parse_rrule(&to_rrule_string(&rule).unwrap()).unwrap();
    assert_eq!(back, rule);
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn valid_rules_pass() {
    validate(&weekly_mwf()).expect("weekly rule should validate");

    let third_tuesday = parse_rrule("FREQ=MONTHLY;BYDAY=TU;BYSETPOS=3").unwrap();
    validate(&third_tuesday).expect("rule without start uses the epoch");
}

#[test]
fn validate_requires_frequency() {
    let err = validate(&RecurrenceRule::new()).unwrap_err();
    assert!(matches!(err, RecurrenceError::MissingFrequency));
}

#[test]
fn validate_rejects_zero_interval() {
    let rule = RecurrenceRule {
        frequency: Some(Frequency::Daily),
        interval: 0,
        ..RecurrenceRule::default()
    };
    assert!(matches!(validate(&rule), Err(RecurrenceError::InvalidRule(_))));
}

#[test]
fn count_suppresses_until() {
    let rule = RecurrenceRule {
        frequency: Some(Frequency::Daily),
        count: 5,
        until: Some(Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap()),
        ..RecurrenceRule::default()
    };

    let rrule = to_rrule_string(&rule).unwrap();
    assert_eq!(rrule, "FREQ=DAILY;COUNT=5");
    assert!(!rrule.contains("UNTIL"), "COUNT and UNTIL must not both appear");
}

#[test]
fn until_is_written_without_count() {
    let rule = RecurrenceRule {
        frequency: Some(Frequency::Daily),
        until: Some(Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap()),
        ..RecurrenceRule::default()
    };
    assert_eq!(to_rrule_string(&rule).unwrap(), "FREQ=DAILY;UNTIL=20270101T000000Z");
}

#[test]
fn parse_empty_list_values_leave_fields_unset() {
    let rule = parse_rrule("FREQ=YEARLY;BYYEARDAY=;BYWEEKNO=").unwrap();

    assert_eq!(rule.by_year_day, None);
    assert_eq!(rule.by_week_number, None);
    assert_eq!(to_rrule_string(&rule).unwrap(), "FREQ=YEARLY");
    assert_eq!(recurrence_core::describe(&rule).unwrap(), "every year");
}

#[test]
fn parse_rejects_zero_set_position() {
    let err = parse_rrule("FREQ=MONTHLY;BYDAY=TU;BYSETPOS=0").unwrap_err();
    assert!(matches!(err, RecurrenceError::InvalidRule(_)));
}

#[test]
fn parsed_rule_survives_json_roundtrip() {
    let rule = parse_rrule("FREQ=MONTHLY;BYDAY=TU;BYSETPOS=-1;BYYEARDAY=1,100").unwrap();
    let back = RecurrenceRule::from_json(&rule.to_json().unwrap()).unwrap();
    assert_eq!(back, rule);
}

#[test]
fn blank_constructed_fields_are_not_serialized() {
    let rule = RecurrenceRule {
        frequency: Some(Frequency::Yearly),
        by_year_day: Some(String::new()),
        by_week_number: Some(String::new()),
        by_set_position: Some(0),
        ..RecurrenceRule::default()
    };
    assert_eq!(to_rrule_string(&rule).unwrap(), "FREQ=YEARLY");
}

#[test]
fn validate_without_start_accepts_early_until() {
    let rule = RecurrenceRule {
        frequency: Some(Frequency::Daily),
        until: Some(Utc.with_ymd_and_hms(1960, 1, 1, 0, 0, 0).unwrap()),
        ..RecurrenceRule::default()
    };
    validate(&rule).expect("unset start must not be later than UNTIL");
}
