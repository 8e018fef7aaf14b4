//! Property-based tests for text normalization using proptest.

use proptest::prelude::*;
use recurrence_core::text::{MONTH_ABBREVIATIONS, WEEKDAY_ABBREVIATIONS};
use recurrence_core::{abbreviate_months, abbreviate_weekdays, cleanup_conjunctions};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_weekday_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(WEEKDAY_ABBREVIATIONS.iter().map(|(full, _)| *full).collect::<Vec<_>>())
}

fn arb_month_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(MONTH_ABBREVIATIONS.iter().map(|(full, _)| *full).collect::<Vec<_>>())
}

/// Filler that cannot extend a weekday or month name into another one
/// (e.g. `"Saturday" + "urday"`).
fn arb_filler() -> impl Strategy<Value = String> {
    "[ ,0-9]{0,12}"
}

/// A sentence interleaving filler with full weekday names.
fn arb_weekday_sentence() -> impl Strategy<Value = (String, usize)> {
    prop::collection::vec((arb_filler(), arb_weekday_name()), 0..8).prop_map(|pieces| {
        let count = pieces.len();
        let text = pieces
            .into_iter()
            .map(|(filler, name)| format!("{}{}", filler, name))
            .collect::<String>();
        (text, count)
    })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn no_full_weekday_name_survives((text, _) in arb_weekday_sentence()) {
        let out = abbreviate_weekdays(&text);
        for (full, _) in WEEKDAY_ABBREVIATIONS {
            prop_assert!(!out.contains(full), "{} left in {:?}", full, out);
        }
    }

    #[test]
    fn one_abbreviation_per_occurrence((text, count) in arb_weekday_sentence()) {
        let out = abbreviate_weekdays(&text);
        let abbreviations: usize = WEEKDAY_ABBREVIATIONS
            .iter()
            .map(|(_, short)| out.matches(short).count())
            .sum();
        prop_assert_eq!(abbreviations, count);
    }

    #[test]
    fn abbreviate_weekdays_is_idempotent((text, _) in arb_weekday_sentence()) {
        let once = abbreviate_weekdays(&text);
        prop_assert_eq!(abbreviate_weekdays(&once), once.clone());
    }

    #[test]
    fn abbreviate_months_is_idempotent(
        pieces in prop::collection::vec((arb_filler(), arb_month_name()), 0..8)
    ) {
        let text: String = pieces.into_iter().map(|(f, m)| format!("{}{}", f, m)).collect();
        let once = abbreviate_months(&text);
        prop_assert_eq!(abbreviate_months(&once), once.clone());
    }

    #[test]
    fn text_without_vocabulary_is_untouched(text in "[a-z 0-9.]{0,64}") {
        prop_assert_eq!(abbreviate_weekdays(&text), text.clone());
        prop_assert_eq!(abbreviate_months(&text), text.clone());
    }

    #[test]
    fn cleanup_never_grows_text(text in "[a-z ,]{0,64}") {
        prop_assert!(cleanup_conjunctions(&text).len() <= text.len());
    }
}
