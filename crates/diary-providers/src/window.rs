//! Assembling raw window payloads from the diary store.
//!
//! A window payload has the shape [`diary_core::build_calendar`] consumes, so
//! providers hand it on unchanged and the builder owns every derived field.

use chrono::{DateTime, Utc};
use diary_core::time::{day_key, day_label, parse_date};
use diary_core::{Calendar, Event, WindowRange, build_calendar};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ProviderError, ProviderResult};
use crate::store::DiaryStore;
use crate::week::WorkingWeek;

/// One weekday of a raw window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPayload {
    pub date: String,
    pub label: String,
    pub is_today: bool,
    pub events: Vec<Event>,
}

/// Raw window handed to the calendar builder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    pub range: WindowRange,
    pub days: Vec<DayPayload>,
    pub agenda: Vec<Event>,
    /// Set when the window was produced by an explicit import.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub imported: bool,
}

impl WindowPayload {
    pub fn event_count(&self) -> usize {
        self.agenda.len()
    }

    /// # Errors
    ///
    /// Returns an `Internal` error if an event fails to serialize.
    pub fn to_value(&self) -> ProviderResult<Value> {
        serde_json::to_value(self).map_err(|e| {
            ProviderError::internal("failed to serialize window payload").with_source(e)
        })
    }

    /// Builds the calendar for this window.
    pub fn to_calendar(&self, now: DateTime<Utc>) -> ProviderResult<Calendar> {
        build_calendar(&self.to_value()?, now)
            .ok_or_else(|| ProviderError::internal("window payload is not an object"))
    }
}

/// Assembles the window for `week` from the store's events.
///
/// Events need a parseable start on one of the week's five days; everything
/// else in the store is left out. Matching events fill the day buckets and,
/// in start order, the agenda.
pub fn assemble_window(store: &DiaryStore, week: WorkingWeek, now: DateTime<Utc>) -> WindowPayload {
    let agenda: Vec<Event> = store
        .normalized_events()
        .into_iter()
        .filter(|event| event.start_instant().is_some())
        .filter(|event| {
            event
                .day_key
                .as_deref()
                .and_then(parse_date)
                .is_some_and(|date| week.contains(date))
        })
        .collect();

    let today = now.date_naive();
    let days = week
        .days()
        .into_iter()
        .map(|date| {
            let key = day_key(date);
            let events = agenda
                .iter()
                .filter(|event| event.day_key.as_deref() == Some(key.as_str()))
                .cloned()
                .collect();
            DayPayload {
                label: day_label(date),
                is_today: date == today,
                date: key,
                events,
            }
        })
        .collect();

    tracing::debug!(
        week = %day_key(week.start()),
        stored = store.events.len(),
        events = agenda.len(),
        "assembled diary window"
    );

    WindowPayload {
        generated_at: store.generated_at.clone(),
        range: week.to_range(),
        days,
        agenda,
        imported: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 13, 9, 0, 0).unwrap()
    }

    fn week() -> WorkingWeek {
        WorkingWeek::containing(NaiveDate::from_ymd_opt(2024, 2, 12).unwrap())
    }

    fn store() -> DiaryStore {
        DiaryStore::from_value(&json!({
            "generatedAt": "2024-02-11T22:00:00Z",
            "events": [
                {"id": "fri-late", "title": "Friday evening viewing", "start": "2024-02-16T19:00:00Z"},
                {"id": "tue", "title": "Valuation", "start": "2024-02-13T11:00:00Z", "status": "tentative"},
                {"id": "mon", "title": "Viewing", "start": "2024-02-12T10:00:00Z"},
                {"id": "sat", "title": "Open house", "start": "2024-02-17T10:00:00Z"},
                {"id": "prev", "title": "Old", "start": "2024-02-09T10:00:00Z"},
                {"id": "undated", "title": "Chase", "dayKey": "2024-02-12"}
            ]
        }))
    }

    #[test]
    fn keeps_only_dated_events_inside_the_week() {
        let window = assemble_window(&store(), week(), now());
        let ids: Vec<_> = window.agenda.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["mon", "tue", "fri-late"]);
        assert_eq!(window.event_count(), 3);
    }

    #[test]
    fn buckets_one_day_per_weekday() {
        let window = assemble_window(&store(), week(), now());
        let dates: Vec<_> = window.days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2024-02-12", "2024-02-13", "2024-02-14", "2024-02-15", "2024-02-16"]
        );
        assert_eq!(window.days[0].label, "Mon 12 Feb");
        assert!(window.days[1].is_today);
        assert!(!window.days[0].is_today);
        assert_eq!(window.days[4].events.len(), 1);
        assert!(window.days[2].events.is_empty());
    }

    #[test]
    fn carries_header_fields() {
        let window = assemble_window(&store(), week(), now());
        assert_eq!(window.generated_at.as_deref(), Some("2024-02-11T22:00:00Z"));
        assert_eq!(window.range.start.as_deref(), Some("2024-02-12"));
        assert!(!window.imported);
    }

    #[test]
    fn serialized_payload_builds_a_calendar() {
        let window = assemble_window(&store(), week(), now());
        let value = window.to_value().unwrap();
        assert!(value.get("imported").is_none());
        assert!(value.get("focusEventId").is_none());

        let calendar = window.to_calendar(now()).unwrap();
        assert_eq!(calendar.days.len(), 5);
        assert_eq!(calendar.totals.count, 3);
        assert_eq!(calendar.focus_event_id.as_deref(), Some("tue"));
        assert_eq!(calendar.today().map(|d| d.date.as_str()), Some("2024-02-13"));
        assert_eq!(calendar.totals.statuses.get("Tentative"), Some(&1));
    }

    #[test]
    fn empty_store_gives_empty_week() {
        let window = assemble_window(&DiaryStore::default(), week(), now());
        assert!(window.agenda.is_empty());
        assert_eq!(window.days.len(), 5);

        let calendar = window.to_calendar(now()).unwrap();
        assert!(calendar.is_empty());
        assert!(calendar.focus_event_id.is_none());
        assert_eq!(calendar.days[0].summary, "No events scheduled");
    }
}
