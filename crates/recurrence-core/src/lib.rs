//! # recurrence-core
//!
//! The logic behind a recurring-rule form: a recurrence rule value type, an
//! English description generator, and the text normalization applied to that
//! description before it is shown next to the form.
//!
//! ## Quick start
//!
//! ```rust
//! use recurrence_core::{summarize, Frequency, RecurrenceRule, RuleInit, Weekday};
//!
//! let rule = RecurrenceRule::create(Some(RuleInit {
//!     frequency: Some(Frequency::Weekly),
//!     by_weekday: Some(vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday]),
//!     ..RuleInit::default()
//! }));
//!
//! assert_eq!(summarize(&rule).unwrap(), "every week on Mon, Wed and Fri");
//! ```
//!
//! ## Modules
//!
//! - [`rule`] — `RecurrenceRule` model, defaults and shallow initialization
//! - [`text`] — weekday/month abbreviation and conjunction cleanup
//! - [`describe`] — rule → English sentence
//! - [`ical`] — rule ↔ RFC 5545 RRULE text, validation via the `rrule` crate
//! - [`error`] — Error types

pub mod describe;
pub mod error;
pub mod ical;
pub mod rule;
pub mod text;

pub use describe::{describe, summarize};
pub use error::RecurrenceError;
pub use ical::{parse_rrule, to_rrule_string, validate};
pub use rule::{Frequency, RecurrenceRule, RuleInit, Weekday};
pub use text::{abbreviate_months, abbreviate_weekdays, cleanup_conjunctions, normalize};
