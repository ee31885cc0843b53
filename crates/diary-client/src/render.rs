//! Text and JSON rendering of calendars.

use diary_core::{Calendar, Day, Event, summarize_day};
use serde::Serialize;

use crate::error::{ClientError, ClientResult};

/// Marks the focus event in listings.
pub const FOCUS_MARKER: char = '>';

/// Shown in the time column for undated events.
const NO_TIME: &str = "--:--";

/// Width of the widest time label, `HH:MM – HH:MM`.
const TIME_WIDTH: usize = 13;

/// Width of a day label, `Mon 12 Feb`.
const DAY_WIDTH: usize = 10;

/// Renders calendars for the terminal.
#[derive(Debug, Clone)]
pub struct Renderer {
    no_events_text: String,
}

impl Renderer {
    pub fn new(no_events_text: impl Into<String>) -> Self {
        Self {
            no_events_text: no_events_text.into(),
        }
    }

    /// The whole window as a grid of days.
    pub fn week(&self, calendar: &Calendar) -> String {
        let mut lines = vec![heading(calendar), self.totals(calendar)];
        for day in &calendar.days {
            lines.push(String::new());
            lines.push(day_heading(day));
            lines.extend(
                day.events
                    .iter()
                    .map(|event| event_line(event, is_focus(calendar, event))),
            );
        }
        lines.join("\n")
    }

    /// One day with every event's details.
    pub fn day(&self, calendar: &Calendar, day: &Day) -> String {
        let mut lines = vec![day_heading(day)];
        for event in &day.events {
            lines.push(event_line(event, is_focus(calendar, event)));
            lines.extend(detail_lines(event));
        }
        lines.join("\n")
    }

    /// The flat agenda, one event per line.
    pub fn agenda(&self, calendar: &Calendar) -> String {
        let mut lines = vec![heading(calendar), self.totals(calendar)];
        if !calendar.is_empty() {
            lines.push(String::new());
        }
        for event in &calendar.agenda {
            let day = event
                .day_key
                .as_deref()
                .map(|key| calendar.day(key).map_or(key, |day| day.label.as_str()))
                .unwrap_or(NO_TIME);
            lines.push(format!(
                "{} {:<day_width$}  {:<time_width$}  {} [{}]",
                marker(is_focus(calendar, event)),
                day,
                event.time_label.as_deref().unwrap_or(NO_TIME),
                event.title,
                event.status_label,
                day_width = DAY_WIDTH,
                time_width = TIME_WIDTH,
            ));
        }
        lines.join("\n")
    }

    /// Report for an explicit import.
    pub fn imported(&self, calendar: &Calendar) -> String {
        let mut lines = vec![
            format!("Imported {}", heading(calendar)),
            self.totals(calendar),
        ];
        if let Some(ref generated_at) = calendar.generated_at {
            lines.push(format!("Diary generated at {}", generated_at));
        }
        lines.join("\n")
    }

    /// Event count with a per-status breakdown.
    pub fn totals(&self, calendar: &Calendar) -> String {
        if calendar.is_empty() {
            return self.no_events_text.clone();
        }
        let statuses = calendar
            .totals
            .statuses
            .iter()
            .map(|(label, count)| format!("{} {}", label, count))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}: {}", summarize_day(calendar.totals.count), statuses)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new("No events scheduled")
    }
}

/// Pretty-printed JSON of any serializable value.
pub fn json<T: Serialize>(value: &T) -> ClientResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ClientError::Render(format!("failed to serialize output: {}", e)))
}

fn heading(calendar: &Calendar) -> String {
    calendar
        .range
        .label
        .clone()
        .unwrap_or_else(|| "Diary".to_string())
}

fn day_heading(day: &Day) -> String {
    format!(
        "{}{} · {}",
        day.label,
        if day.is_today { " (today)" } else { "" },
        day.summary
    )
}

fn is_focus(calendar: &Calendar, event: &Event) -> bool {
    calendar.focus_event_id.as_deref() == Some(event.id.as_str())
}

fn marker(focused: bool) -> char {
    if focused { FOCUS_MARKER } else { ' ' }
}

fn event_line(event: &Event, focused: bool) -> String {
    format!(
        "  {} {:<width$}  {} [{}]",
        marker(focused),
        event.time_label.as_deref().unwrap_or(NO_TIME),
        event.title,
        event.status_label,
        width = TIME_WIDTH,
    )
}

fn detail_lines(event: &Event) -> Vec<String> {
    let mut details = Vec::new();
    let mut push = |label: &str, value: &str| details.push(format!("      {}: {}", label, value));

    if let Some(ref event_type) = event.event_type {
        push("Type", event_type);
    }
    if let Some(ref negotiator) = event.negotiator {
        push("Negotiator", negotiator);
    }
    if let Some(ref location) = event.location {
        push("Location", location);
    }
    if let Some(ref property) = event.property {
        let text = match (&property.address, &property.id) {
            (Some(address), Some(id)) => format!("{} ({})", address, id),
            (Some(address), None) => address.clone(),
            (None, Some(id)) => id.clone(),
            (None, None) => property.href.clone().unwrap_or_default(),
        };
        push("Property", &text);
    }
    if !event.attendees.is_empty() {
        let attendees = event
            .attendees
            .iter()
            .map(|attendee| match attendee.role {
                Some(ref role) => format!("{} ({})", attendee.name, role),
                None => attendee.name.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        push("Attendees", &attendees);
    }
    if let Some(ref notes) = event.notes {
        push("Notes", notes);
    }
    for link in &event.links {
        push(&link.label, &link.href);
    }

    details
}
