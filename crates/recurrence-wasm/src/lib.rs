//! WASM bindings for recurrence-core.
//!
//! Exposes the rule model, description generator and text normalization to a
//! JavaScript recurring-rule form via `wasm-bindgen`. Rules cross the boundary
//! as JSON strings using the form's field names (`dtstart`, `freq`,
//! `byweekday`, ...).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p recurrence-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/recurrence-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/recurrence_wasm.wasm
//! ```

use recurrence_core::{text, RecurrenceError, RecurrenceRule};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn to_js(e: RecurrenceError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// `null`/`undefined` from JavaScript arrives as `None` and is rejected.
fn require_text(value: Option<String>, name: &str) -> Result<String, RecurrenceError> {
    value.ok_or_else(|| RecurrenceError::InvalidArgument(format!("{} must be a string", name)))
}

fn parse_rule(json: &str) -> Result<RecurrenceRule, JsValue> {
    RecurrenceRule::from_json(json).map_err(to_js)
}

// ---------------------------------------------------------------------------
// Text normalization
// ---------------------------------------------------------------------------

/// Replace full weekday names with their three-letter abbreviations.
#[wasm_bindgen(js_name = "abbreviateWeekdays")]
pub fn abbreviate_weekdays(input: Option<String>) -> Result<String, JsValue> {
    let input = require_text(input, "input").map_err(to_js)?;
    Ok(text::abbreviate_weekdays(&input))
}

/// Replace full month names with their three-letter abbreviations.
#[wasm_bindgen(js_name = "abbreviateMonths")]
pub fn abbreviate_months(input: Option<String>) -> Result<String, JsValue> {
    let input = require_text(input, "input").map_err(to_js)?;
    Ok(text::abbreviate_months(&input))
}

/// Collapse `and and` and drop commas before `and`.
#[wasm_bindgen(js_name = "cleanupConjunctions")]
pub fn cleanup_conjunctions(input: Option<String>) -> Result<String, JsValue> {
    let input = require_text(input, "input").map_err(to_js)?;
    Ok(text::cleanup_conjunctions(&input))
}

/// All three normalization steps, in the order a form applies them.
#[wasm_bindgen(js_name = "normalizeText")]
pub fn normalize_text(input: Option<String>) -> Result<String, JsValue> {
    let input = require_text(input, "input").map_err(to_js)?;
    Ok(text::normalize(&input))
}

// ---------------------------------------------------------------------------
// Rule model
// ---------------------------------------------------------------------------

/// Create a rule with defaults, overwritten by the fields of `init_json`.
///
/// Returns the full rule as a JSON string.
#[wasm_bindgen(js_name = "createRule")]
pub fn create_rule(init_json: Option<String>) -> Result<String, JsValue> {
    let rule = match init_json {
        Some(json) => parse_rule(&json)?,
        None => RecurrenceRule::create(None),
    };
    rule.to_json().map_err(to_js)
}

/// Describe a rule. With `raw`, full weekday/month names are kept.
#[wasm_bindgen(js_name = "describeRule")]
pub fn describe_rule(rule_json: &str, raw: bool) -> Result<String, JsValue> {
    let rule = parse_rule(rule_json)?;
    let sentence = if raw {
        recurrence_core::describe(&rule)
    } else {
        recurrence_core::summarize(&rule)
    };
    sentence.map_err(to_js)
}

/// Validate a rule and return its RRULE text (e.g. `"FREQ=WEEKLY;BYDAY=MO"`).
#[wasm_bindgen(js_name = "toRRule")]
pub fn to_rrule(rule_json: &str) -> Result<String, JsValue> {
    let rule = parse_rule(rule_json)?;
    recurrence_core::validate(&rule).map_err(to_js)?;
    recurrence_core::to_rrule_string(&rule).map_err(to_js)
}

/// Parse RRULE text into a rule JSON string.
#[wasm_bindgen(js_name = "parseRRule")]
pub fn parse_rrule(rrule: &str) -> Result<String, JsValue> {
    let rule = recurrence_core::parse_rrule(rrule).map_err(to_js)?;
    rule.to_json().map_err(to_js)
}

/// Validate a rule against RFC 5545; throws with the reason when invalid.
#[wasm_bindgen(js_name = "validateRule")]
pub fn validate_rule(rule_json: &str) -> Result<(), JsValue> {
    let rule = parse_rule(rule_json)?;
    recurrence_core::validate(&rule).map_err(to_js)
}
