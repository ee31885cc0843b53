//! Error types returned by the composer and the calendar mutator.
//!
//! Malformed upstream records never surface as errors; they are dropped
//! during normalization. The two failures below are user-facing and
//! recoverable, so they carry enough detail for a caller to explain what to
//! fix.

use std::fmt;

use thiserror::Error;

/// A composer form field that takes part in validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Date,
    Start,
}

impl FormField {
    /// Returns the field name as it appears in the form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Date => "date",
            Self::Start => "start",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The composer rejected a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
pub struct ValidationError {
    /// Required fields left empty.
    pub missing: Vec<FormField>,
    /// Fields present but not in the expected format.
    pub invalid: Vec<FormField>,
}

impl ValidationError {
    /// Returns true if no field failed validation.
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }

    /// Returns true if `field` was reported missing.
    pub fn is_missing(&self, field: FormField) -> bool {
        self.missing.contains(&field)
    }

    /// Returns true if `field` was reported malformed.
    pub fn is_invalid(&self, field: FormField) -> bool {
        self.invalid.contains(&field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |fields: &[FormField]| {
            fields
                .iter()
                .map(FormField::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };

        match (self.missing.is_empty(), self.invalid.is_empty()) {
            (false, true) => write!(f, "missing required fields: {}", join(&self.missing)),
            (true, false) => write!(f, "invalid fields: {}", join(&self.invalid)),
            (false, false) => write!(
                f,
                "missing required fields: {}; invalid fields: {}",
                join(&self.missing),
                join(&self.invalid)
            ),
            (true, true) => write!(f, "invalid form"),
        }
    }
}

/// The mutator could not place an event into a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The event has neither a parseable start nor an explicit day key.
    #[error("event {event_id} has no date and cannot be placed in a day")]
    Unplaceable { event_id: String },

    /// The event's day is not one of the calendar's days.
    #[error("{day_key} is outside current window{}", window_suffix(.window))]
    OutsideWindow {
        day_key: String,
        /// Label of the loaded window, if it has one.
        window: Option<String>,
    },

    /// An event with the same id is already in the calendar.
    #[error("event {event_id} is already in the calendar")]
    DuplicateEvent { event_id: String },
}

fn window_suffix(window: &Option<String>) -> String {
    window
        .as_deref()
        .map(|label| format!(" ({})", label))
        .unwrap_or_default()
}
