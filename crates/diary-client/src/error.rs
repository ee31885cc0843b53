//! Client error types.

use std::fmt;

use diary_core::{FormField, PlacementError, ValidationError};
use diary_providers::{ProviderError, ProviderErrorKind};

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// The diary source could not be read.
    Provider(ProviderError),
    /// The booking form was rejected.
    Validation(ValidationError),
    /// The booking could not be placed in its week.
    Placement(PlacementError),
    /// The requested date has no day in its window.
    NoSuchDay(String),
    /// Output could not be produced.
    Render(String),
}

impl ClientError {
    /// A hint on how to fix the error, if there is one.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Validation(err) => {
                let mut flags: Vec<String> = err
                    .missing
                    .iter()
                    .chain(err.invalid.iter())
                    .map(field_hint)
                    .collect();
                flags.dedup();
                Some(flags.join(" "))
            }
            Self::Placement(PlacementError::OutsideWindow { .. }) | Self::NoSuchDay(_) => {
                Some("the diary covers Monday to Friday; pick a working day".to_string())
            }
            Self::Placement(PlacementError::DuplicateEvent { .. }) => {
                Some("retry the booking to get a fresh id".to_string())
            }
            Self::Config(_) => Some("run `diary config path` to locate the file".to_string()),
            Self::Provider(err) if err.kind() == ProviderErrorKind::Misconfigured => {
                Some("run `diary config validate` for details".to_string())
            }
            _ => None,
        }
    }
}

fn field_hint(field: &FormField) -> String {
    match field {
        FormField::Title => "--title \"Viewing: 12 Market Street\"".to_string(),
        FormField::Date => "--date YYYY-MM-DD".to_string(),
        FormField::Start => "--start HH:MM".to_string(),
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Provider(err) => write!(f, "provider error: {}", err),
            Self::Validation(err) => write!(f, "cannot book event: {}", err),
            Self::Placement(err) => write!(f, "cannot place event: {}", err),
            Self::NoSuchDay(date) => write!(f, "no diary day for {}", date),
            Self::Render(msg) => write!(f, "render error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Provider(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Placement(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProviderError> for ClientError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err)
    }
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<PlacementError> for ClientError {
    fn from(err: PlacementError) -> Self {
        Self::Placement(err)
    }
}
