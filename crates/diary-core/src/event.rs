//! Diary event types.
//!
//! This module provides the canonical shapes every diary appointment is
//! normalized into:
//! - [`Event`]: a viewing, valuation, follow-up or internal meeting
//! - [`Attendee`]: a named participant with an optional role and email
//! - [`Link`]: a labelled link shown alongside the event
//! - [`PropertyRef`]: the property an appointment concerns
//!
//! All types serialize with camelCase field names, matching the raw window
//! payload the calendar builder accepts, so a serialized event can be fed
//! back through normalization unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::{EventStatus, status_key};
use crate::time::{day_key_from_start, parse_instant, time_label};

/// A participant in a diary appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    /// Display name, never empty.
    pub name: String,
    /// Role in the appointment (e.g. "Buyer", "Vendor").
    pub role: Option<String>,
    /// Contact email.
    pub email: Option<String>,
}

impl Attendee {
    /// Creates an attendee with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
            email: None,
        }
    }

    /// Builder method to set the role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Builder method to set the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// A labelled link attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

/// Reference to the property an appointment is about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRef {
    pub id: Option<String>,
    pub address: Option<String>,
    pub href: Option<String>,
}

impl PropertyRef {
    /// Returns true if none of the reference fields are set.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.address.is_none() && self.href.is_none()
    }
}

/// A normalized diary appointment.
///
/// `status_label`, `status_key`, `day_key` and `time_label` are derived
/// fields; the builder methods keep them in step with `status`, `start` and
/// `end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Identifier, unique within a calendar.
    pub id: String,
    pub title: String,
    /// Appointment type (e.g. "Viewing", "Follow-up", "Internal meeting").
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    /// Raw upstream status token.
    pub status: Option<String>,
    /// Human label derived from `status`.
    pub status_label: String,
    /// `status_label` without whitespace.
    pub status_key: String,
    pub negotiator: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub property: Option<PropertyRef>,
    pub attendees: Vec<Attendee>,
    pub links: Vec<Link>,
    /// Start timestamp as supplied; parsed lazily.
    pub start: Option<String>,
    /// End timestamp as supplied; ignored when it does not parse.
    pub end: Option<String>,
    /// Calendar date (`YYYY-MM-DD`) the event belongs to.
    pub day_key: Option<String>,
    /// Display time range, e.g. `09:30 – 10:00`.
    pub time_label: Option<String>,
}

impl Event {
    /// Creates an undated event with no status.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let status_label = EventStatus::Scheduled.label().into_owned();
        Self {
            id: id.into(),
            title: title.into(),
            event_type: None,
            status: None,
            status_key: status_key(&status_label),
            status_label,
            negotiator: None,
            location: None,
            notes: None,
            property: None,
            attendees: Vec::new(),
            links: Vec::new(),
            start: None,
            end: None,
            day_key: None,
            time_label: None,
        }
    }

    /// The UTC instant the event starts at, if the start parses.
    pub fn start_instant(&self) -> Option<DateTime<Utc>> {
        self.start.as_deref().and_then(parse_instant)
    }

    /// Returns true if the event has a parseable start at or after `now`.
    pub fn is_upcoming_at(&self, now: DateTime<Utc>) -> bool {
        self.start_instant().is_some_and(|start| start >= now)
    }

    /// Builder method to set the appointment type.
    pub fn with_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    /// Builder method to set the status, re-deriving its label and key.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        let status = status.into();
        self.status_label = EventStatus::from_token(Some(status.as_str())).label().into_owned();
        self.status_key = status_key(&self.status_label);
        self.status = Some(status);
        self
    }

    /// Builder method to set the start.
    ///
    /// Derives the day key when none was set explicitly.
    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        let start = start.into();
        if self.day_key.is_none() {
            self.day_key = day_key_from_start(&start);
        }
        self.start = Some(start);
        self.refresh_time_label();
        self
    }

    /// Builder method to set the end.
    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self.refresh_time_label();
        self
    }

    /// Builder method to set an explicit day key.
    pub fn with_day_key(mut self, day_key: impl Into<String>) -> Self {
        self.day_key = Some(day_key.into());
        self
    }

    /// Builder method to set the negotiator.
    pub fn with_negotiator(mut self, negotiator: impl Into<String>) -> Self {
        self.negotiator = Some(negotiator.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Builder method to set the property reference.
    pub fn with_property(mut self, property: PropertyRef) -> Self {
        self.property = Some(property);
        self
    }

    /// Builder method to add an attendee.
    pub fn with_attendee(mut self, attendee: Attendee) -> Self {
        self.attendees.push(attendee);
        self
    }

    /// Builder method to add a link.
    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    fn refresh_time_label(&mut self) {
        self.time_label = time_label(self.start.as_deref(), self.end.as_deref());
    }
}
