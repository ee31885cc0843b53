//! Building new diary events from user-entered form values.
//!
//! Composed events are client-originated bookings the upstream diary does not
//! know about yet. They go through the same derivations as upstream events,
//! so they are indistinguishable in shape from normalized ones.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{FormField, ValidationError};
use crate::event::{Attendee, Event, Link, PropertyRef};
use crate::status::COMPOSED_STATUS;
use crate::time::{parse_clock_time, parse_date};

/// Label of the link synthesized for a referenced property.
pub const PROPERTY_LINK_LABEL: &str = "View property record";

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Raw values of the booking form. Every field is free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventForm {
    pub title: Option<String>,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Start time, `HH:MM`.
    pub start: Option<String>,
    /// End time, `HH:MM`. Dropped when malformed.
    pub end: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub negotiator: Option<String>,
    /// Comma-separated entries, each `Name` or `Name - Role`.
    pub attendees: Option<String>,
    /// Property reference id.
    pub property: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Settings that shape composed events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerOptions {
    /// Prefix of generated event ids.
    pub id_prefix: String,
    /// Base path property record links are built under.
    pub property_href_base: String,
}

impl Default for ComposerOptions {
    fn default() -> Self {
        Self {
            id_prefix: "local".to_string(),
            property_href_base: "/properties".to_string(),
        }
    }
}

/// Turns booking forms into events.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    options: ComposerOptions,
}

impl Composer {
    pub fn new(options: ComposerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ComposerOptions {
        &self.options
    }

    /// Builds a confirmed event from a booking form.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming every missing or malformed
    /// required field (`title`, `date`, `start`).
    pub fn compose(&self, form: &EventForm) -> Result<Event, ValidationError> {
        let (title, date, start) = validate(form)?;

        let mut event = Event::new(self.next_id(), title)
            .with_status(COMPOSED_STATUS)
            .with_start(timestamp(date, start));

        if let Some(raw_end) = filled(&form.end) {
            match parse_clock_time(raw_end) {
                Some(end) => event = event.with_end(timestamp(date, end)),
                None => tracing::warn!(end = raw_end, "ignoring malformed end time"),
            }
        }

        if let Some(event_type) = filled(&form.event_type) {
            event = event.with_type(event_type);
        }
        if let Some(negotiator) = filled(&form.negotiator) {
            event = event.with_negotiator(negotiator);
        }
        if let Some(location) = filled(&form.location) {
            event = event.with_location(location);
        }
        if let Some(notes) = filled(&form.notes) {
            event = event.with_notes(notes);
        }

        if let Some(property_id) = filled(&form.property) {
            let href = self.property_href(property_id);
            event = event
                .with_property(PropertyRef {
                    id: Some(property_id.to_string()),
                    address: None,
                    href: Some(href.clone()),
                })
                .with_link(Link::new(PROPERTY_LINK_LABEL, href));
        }

        event.attendees = filled(&form.attendees)
            .map(parse_attendees)
            .unwrap_or_default();

        tracing::debug!(id = %event.id, day = ?event.day_key, "composed diary event");
        Ok(event)
    }

    fn property_href(&self, property_id: &str) -> String {
        format!(
            "{}/{}",
            self.options.property_href_base.trim_end_matches('/'),
            urlencoding::encode(property_id)
        )
    }

    // Clock reads alone can repeat; the sequence never does.
    fn next_id(&self) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        format!("{}-{:x}-{}", self.options.id_prefix, nanos, sequence)
    }
}

/// Builds an event from a booking form with default [`ComposerOptions`].
pub fn compose_event(form: &EventForm) -> Result<Event, ValidationError> {
    Composer::default().compose(form)
}

/// Parses the free-text attendee field.
///
/// Entries are comma-separated; each is split on its first `-` into name and
/// role. Entries without a name are dropped.
pub fn parse_attendees(text: &str) -> Vec<Attendee> {
    text.split(',')
        .filter_map(|entry| {
            let (name, role) = match entry.split_once('-') {
                Some((name, role)) => (name.trim(), role.trim()),
                None => (entry.trim(), ""),
            };
            if name.is_empty() {
                return None;
            }
            let attendee = Attendee::new(name);
            Some(if role.is_empty() {
                attendee
            } else {
                attendee.with_role(role)
            })
        })
        .collect()
}

fn validate(form: &EventForm) -> Result<(&str, NaiveDate, NaiveTime), ValidationError> {
    let mut error = ValidationError::default();

    let title = filled(&form.title);
    if title.is_none() {
        error.missing.push(FormField::Title);
    }

    let date = match filled(&form.date) {
        None => {
            error.missing.push(FormField::Date);
            None
        }
        Some(raw) => {
            let date = parse_date(raw);
            if date.is_none() {
                error.invalid.push(FormField::Date);
            }
            date
        }
    };

    let start = match filled(&form.start) {
        None => {
            error.missing.push(FormField::Start);
            None
        }
        Some(raw) => {
            let start = parse_clock_time(raw);
            if start.is_none() {
                error.invalid.push(FormField::Start);
            }
            start
        }
    };

    match (title, date, start) {
        (Some(title), Some(date), Some(start)) => Ok((title, date, start)),
        _ => Err(error),
    }
}

fn timestamp(date: NaiveDate, time: NaiveTime) -> String {
    date.and_time(time).format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
