//! Copy-on-write insertion of events into a calendar.

use chrono::{DateTime, Utc};

use crate::calendar::{Calendar, compute_totals, find_focus_event_id, sort_events, summarize_day};
use crate::error::PlacementError;
use crate::event::Event;

/// Inserts an event into a calendar, returning the successor calendar.
///
/// The event's day bucket and the agenda are copied, extended and re-sorted;
/// totals and focus are recomputed from scratch with `now`. The input
/// calendar is left untouched.
///
/// # Errors
///
/// - [`PlacementError::Unplaceable`] if the event has no day key
/// - [`PlacementError::DuplicateEvent`] if its id is already in the agenda
///   or any day bucket
/// - [`PlacementError::OutsideWindow`] if no day of the calendar matches
pub fn insert_event(
    calendar: &Calendar,
    event: Event,
    now: DateTime<Utc>,
) -> Result<Calendar, PlacementError> {
    let Some(day_key) = event.day_key.clone() else {
        return Err(PlacementError::Unplaceable { event_id: event.id });
    };

    if contains_event(calendar, &event.id) {
        return Err(PlacementError::DuplicateEvent { event_id: event.id });
    }

    let Some(index) = calendar.days.iter().position(|day| day.date == day_key) else {
        tracing::debug!(day = %day_key, "event falls outside the loaded window");
        return Err(PlacementError::OutsideWindow {
            day_key,
            window: calendar.range.label.clone(),
        });
    };

    let mut next = calendar.clone();

    let day = &mut next.days[index];
    day.events.push(event.clone());
    sort_events(&mut day.events);
    day.summary = summarize_day(day.events.len());

    next.agenda.push(event);
    sort_events(&mut next.agenda);
    next.totals = compute_totals(&next.agenda);
    next.focus_event_id = find_focus_event_id(&next.agenda, now);

    Ok(next)
}

// A supplied agenda need not mirror the day buckets, so both are searched.
fn contains_event(calendar: &Calendar, id: &str) -> bool {
    calendar.event(id).is_some()
        || calendar
            .days
            .iter()
            .any(|day| day.events.iter().any(|event| event.id == id))
}

impl Calendar {
    /// Method form of [`insert_event`].
    pub fn insert(&self, event: Event, now: DateTime<Utc>) -> Result<Calendar, PlacementError> {
        insert_event(self, event, now)
    }
}
