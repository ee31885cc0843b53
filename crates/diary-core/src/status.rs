//! Appointment status taxonomy.
//!
//! Upstream diaries send a free-form status token. The engine maps the tokens
//! it knows to fixed display labels and title-cases anything else, so every
//! event carries a `statusLabel` and a whitespace-free `statusKey` usable as a
//! grouping or styling key.

use std::borrow::Cow;

/// Label used when an event carries no status at all.
pub const DEFAULT_STATUS_LABEL: &str = "Scheduled";

/// Status given to events booked through the composer.
pub const COMPOSED_STATUS: &str = "confirmed";

/// A classified appointment status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventStatus {
    /// No status supplied.
    Scheduled,
    Confirmed,
    AwaitingConfirmation,
    Tentative,
    Internal,
    Compliance,
    /// Any other token, kept verbatim.
    Other(String),
}

impl EventStatus {
    /// Classifies a raw status token. Matching is case-insensitive.
    pub fn from_token(token: Option<&str>) -> Self {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Self::Scheduled;
        };

        match token.to_lowercase().as_str() {
            "confirmed" => Self::Confirmed,
            "awaiting_confirmation" | "awaiting confirmation" => Self::AwaitingConfirmation,
            "tentative" => Self::Tentative,
            "internal" => Self::Internal,
            "compliance" => Self::Compliance,
            _ => Self::Other(token.to_string()),
        }
    }

    /// Returns the human-readable label for this status.
    pub fn label(&self) -> Cow<'static, str> {
        match self {
            Self::Scheduled => Cow::Borrowed(DEFAULT_STATUS_LABEL),
            Self::Confirmed => Cow::Borrowed("Confirmed"),
            Self::AwaitingConfirmation => Cow::Borrowed("Awaiting confirmation"),
            Self::Tentative => Cow::Borrowed("Tentative"),
            Self::Internal => Cow::Borrowed("Internal"),
            Self::Compliance => Cow::Borrowed("Compliance"),
            Self::Other(token) => Cow::Owned(title_case_token(token)),
        }
    }
}

/// Derives the status label for an optional raw status token.
pub fn status_label(status: Option<&str>) -> String {
    EventStatus::from_token(status).label().into_owned()
}

/// Derives the grouping key for a status label by removing all whitespace.
///
/// Labels that differ only in whitespace share a key.
pub fn status_key(label: &str) -> String {
    label.chars().filter(|c| !c.is_whitespace()).collect()
}

/// `no_show` -> `No Show`; only the first letter of each part is touched.
fn title_case_token(token: &str) -> String {
    token
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
