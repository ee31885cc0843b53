//! Raw diary record to [`Event`] normalization.
//!
//! Upstream payloads have no enforced shape, so this is the only place the
//! engine validates them. Each raw record either becomes a fully derived
//! [`Event`] or is discarded; nothing here returns an error.
//!
//! The normalization process:
//! 1. Requires a structured record with an identifier and a title
//! 2. Trims text fields, dropping the empty ones
//! 3. Keeps attendees, links and the property reference only when well-formed
//! 4. Derives `statusLabel`, `statusKey`, `dayKey` and `timeLabel`

use serde_json::{Map, Value};

use crate::event::{Attendee, Event, Link, PropertyRef};
use crate::status::{status_key, status_label};
use crate::time::{day_key_from_start, time_label};

/// Converts one raw appointment record into an [`Event`].
///
/// Returns `None` when the input is not an object, or has no identifier or
/// no non-blank title.
pub fn normalize_event(raw: &Value) -> Option<Event> {
    let Some(record) = raw.as_object() else {
        tracing::debug!("discarding non-object diary record");
        return None;
    };

    let Some(id) = identifier(record.get("id")) else {
        tracing::debug!("discarding diary record without an id");
        return None;
    };

    let Some(title) = text(record, "title") else {
        tracing::debug!(id = %id, "discarding diary record without a title");
        return None;
    };

    let status = text(record, "status");
    let label = text(record, "statusLabel").unwrap_or_else(|| status_label(status.as_deref()));

    let start = text(record, "start");
    let end = text(record, "end");
    let day_key = text(record, "dayKey").or_else(|| start.as_deref().and_then(day_key_from_start));

    Some(Event {
        id,
        title,
        event_type: text(record, "type"),
        status,
        status_key: status_key(&label),
        status_label: label,
        negotiator: text(record, "negotiator"),
        location: text(record, "location"),
        notes: text(record, "notes"),
        property: record.get("property").and_then(normalize_property),
        attendees: list(record, "attendees", normalize_attendee),
        links: list(record, "links", normalize_link),
        time_label: time_label(start.as_deref(), end.as_deref()),
        start,
        end,
        day_key,
    })
}

/// Normalizes every entry of a raw event list, dropping the discarded ones.
pub fn normalize_events(raw: &[Value]) -> Vec<Event> {
    raw.iter().filter_map(normalize_event).collect()
}

/// Normalizes a raw attendee; requires a non-empty name.
pub fn normalize_attendee(raw: &Value) -> Option<Attendee> {
    let record = raw.as_object()?;
    Some(Attendee {
        name: text(record, "name")?,
        role: text(record, "role"),
        email: text(record, "email"),
    })
}

/// Normalizes a raw link; requires both label and href.
pub fn normalize_link(raw: &Value) -> Option<Link> {
    let record = raw.as_object()?;
    Some(Link {
        label: text(record, "label")?,
        href: text(record, "href")?,
    })
}

/// Normalizes a raw property reference; requires at least one field.
pub fn normalize_property(raw: &Value) -> Option<PropertyRef> {
    let record = raw.as_object()?;
    let property = PropertyRef {
        id: text(record, "id"),
        address: text(record, "address"),
        href: text(record, "href"),
    };
    (!property.is_empty()).then_some(property)
}

/// Returns the trimmed string at `key`, or `None` if absent, not a string or blank.
pub(crate) fn text(record: &Map<String, Value>, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// Upstream ids are sometimes numeric.
fn identifier(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn list<T>(record: &Map<String, Value>, key: &str, f: fn(&Value) -> Option<T>) -> Vec<T> {
    record
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(f).collect())
        .unwrap_or_default()
}
