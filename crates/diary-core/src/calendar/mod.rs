//! Calendar model and builder.
//!
//! A [`Calendar`] is the single view-state value for one diary window. It
//! holds the day buckets used by the week grid and single-day views, the flat
//! agenda, status totals and the focus pointer, and guarantees:
//!
//! - every day event also appears in the agenda
//! - the agenda and every day are sorted ascending by start, undated last
//! - `totals.count` equals the agenda length
//! - the focus id is `None` only for an empty agenda and otherwise names an
//!   agenda event
//!
//! Calendars are immutable values. [`build_calendar`] creates one per window
//! fetch and [`crate::mutate::insert_event`] derives successors from it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::event::Event;
use crate::normalize::{normalize_event, text};
use crate::time::{compare_instants, day_key, day_label, parse_date};


/// Descriptor of the window a calendar was built for.
///
/// Carried through from the upstream payload untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowRange {
    /// Display label, e.g. `Week of 12 Feb 2024 – 16 Feb 2024`.
    pub label: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    /// Start cursor of the preceding window.
    pub previous_start: Option<String>,
    /// Start cursor of the following window.
    pub next_start: Option<String>,
}

/// The events of one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    /// Day key (`YYYY-MM-DD`).
    pub date: String,
    pub label: String,
    pub is_today: bool,
    pub events: Vec<Event>,
    pub summary: String,
}

impl Day {
    /// Creates a day bucket, sorting its events and deriving the summary.
    pub fn new(
        date: impl Into<String>,
        label: impl Into<String>,
        is_today: bool,
        mut events: Vec<Event>,
    ) -> Self {
        sort_events(&mut events);
        Self {
            date: date.into(),
            label: label.into(),
            is_today,
            summary: summarize_day(events.len()),
            events,
        }
    }

    /// Returns true if no events are scheduled on this day.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Event count and per-status tally of an agenda.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub count: usize,
    /// Keyed by status label.
    pub statuses: BTreeMap<String, usize>,
}

/// The calendar model for one diary window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    pub range: WindowRange,
    /// When the upstream diary data was generated, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    /// Day buckets ordered by date.
    pub days: Vec<Day>,
    /// Every event in the window, ordered by start.
    pub agenda: Vec<Event>,
    /// The event a view should highlight by default.
    pub focus_event_id: Option<String>,
    pub totals: Totals,
}

impl Calendar {
    /// Creates a calendar from days and an agenda, deriving totals and focus.
    pub fn new(
        range: WindowRange,
        mut days: Vec<Day>,
        mut agenda: Vec<Event>,
        now: DateTime<Utc>,
    ) -> Self {
        days.sort_by(|a, b| a.date.cmp(&b.date));
        sort_events(&mut agenda);
        Self {
            range,
            generated_at: None,
            focus_event_id: find_focus_event_id(&agenda, now),
            totals: compute_totals(&agenda),
            days,
            agenda,
        }
    }

    /// Returns the day bucket for a date key.
    pub fn day(&self, date: &str) -> Option<&Day> {
        self.days.iter().find(|day| day.date == date)
    }

    /// Looks up an agenda event by id.
    pub fn event(&self, id: &str) -> Option<&Event> {
        self.agenda.iter().find(|event| event.id == id)
    }

    /// Returns the focus event, if any.
    pub fn focus_event(&self) -> Option<&Event> {
        self.focus_event_id.as_deref().and_then(|id| self.event(id))
    }

    /// Returns the day flagged as today, if it lies in this window.
    pub fn today(&self) -> Option<&Day> {
        self.days.iter().find(|day| day.is_today)
    }

    /// Returns true if the window holds no events.
    pub fn is_empty(&self) -> bool {
        self.agenda.is_empty()
    }
}

/// Builds a [`Calendar`] from a raw window payload.
///
/// The payload is shaped `{range, generatedAt?, days?, agenda?, focusEventId?}`.
/// Returns `None` if it is not an object. Malformed days and events are
/// dropped; a supplied agenda takes precedence over the day buckets, and a
/// supplied focus id is honoured only if it names an agenda event.
pub fn build_calendar(raw: &Value, now: DateTime<Utc>) -> Option<Calendar> {
    let Some(window) = raw.as_object() else {
        tracing::debug!("raw window payload is not an object");
        return None;
    };

    let range = window
        .get("range")
        .and_then(|value| serde_json::from_value::<WindowRange>(value.clone()).ok())
        .unwrap_or_default();

    let today = day_key(now.date_naive());
    let days: Vec<Day> = window
        .get("days")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(|entry| build_day(entry, &today)).collect())
        .unwrap_or_default();

    let agenda: Vec<Event> = match window.get("agenda").and_then(Value::as_array) {
        Some(entries) => entries.iter().filter_map(normalize_event).collect(),
        None => days.iter().flat_map(|day| day.events.iter().cloned()).collect(),
    };

    let mut calendar = Calendar::new(range, days, agenda, now);
    calendar.generated_at = text(window, "generatedAt");
    if let Some(id) = text(window, "focusEventId").filter(|id| calendar.event(id).is_some()) {
        calendar.focus_event_id = Some(id);
    }

    tracing::debug!(
        days = calendar.days.len(),
        events = calendar.agenda.len(),
        focus = calendar.focus_event_id.as_deref().unwrap_or("-"),
        "built diary calendar"
    );

    Some(calendar)
}

fn build_day(raw: &Value, today: &str) -> Option<Day> {
    let entry: &Map<String, Value> = raw.as_object()?;
    let Some(date) = text(entry, "date") else {
        tracing::debug!("discarding day entry without a date");
        return None;
    };

    let label = text(entry, "label")
        .or_else(|| parse_date(&date).map(day_label))
        .unwrap_or_else(|| date.clone());
    let is_today = entry
        .get("isToday")
        .and_then(Value::as_bool)
        .unwrap_or(date == today);
    let events = entry
        .get("events")
        .and_then(Value::as_array)
        .map(|events| events.iter().filter_map(normalize_event).collect())
        .unwrap_or_default();

    Some(Day::new(date, label, is_today, events))
}

/// Sorts events ascending by start; unparseable or missing starts go last.
///
/// The sort is stable, so equal starts keep their relative order.
pub fn sort_events(events: &mut [Event]) {
    events.sort_by(|a, b| compare_instants(a.start_instant(), b.start_instant()));
}

/// Summary line for a day with `count` events.
pub fn summarize_day(count: usize) -> String {
    match count {
        0 => "No events scheduled".to_string(),
        1 => "1 event".to_string(),
        n => format!("{} events", n),
    }
}

/// Picks the event a view should foreground.
///
/// The first event starting at or after `now`, else the first event, else
/// `None` for an empty agenda. Expects `agenda` in start order.
pub fn find_focus_event_id(agenda: &[Event], now: DateTime<Utc>) -> Option<String> {
    agenda
        .iter()
        .find(|event| event.is_upcoming_at(now))
        .or_else(|| agenda.first())
        .map(|event| event.id.clone())
}

/// Counts the agenda and tallies it by status label.
pub fn compute_totals(agenda: &[Event]) -> Totals {
    let mut statuses = BTreeMap::new();
    for event in agenda {
        *statuses.entry(event.status_label.clone()).or_insert(0) += 1;
    }
    Totals {
        count: agenda.len(),
        statuses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn event_at(id: &str, start: &str) -> Event {
        Event::new(id, format!("Event {}", id)).with_start(start)
    }

    mod sorting {
        use super::*;

        #[test]
        fn ascending_with_undated_last_and_stable() {
            let mut events = vec![
                Event::new("undated-a", "A"),
                event_at("noon", "2024-02-12T12:00:00Z"),
                event_at("bad", "someday"),
                event_at("early", "2024-02-12T09:30:00Z"),
                Event::new("undated-b", "B"),
                event_at("noon-2", "2024-02-12T12:00:00Z"),
            ];
            sort_events(&mut events);
            let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
            assert_eq!(
                ids,
                vec!["early", "noon", "noon-2", "undated-a", "bad", "undated-b"]
            );
        }

        #[test]
        fn offsets_compare_by_instant() {
            let mut events = vec![
                event_at("london", "2024-06-12T09:00:00+01:00"),
                event_at("utc", "2024-06-12T08:30:00Z"),
            ];
            sort_events(&mut events);
            assert_eq!(events[0].id, "london");
        }
    }

    mod summaries {
        use super::*;

        #[test]
        fn pluralization() {
            assert_eq!(summarize_day(0), "No events scheduled");
            assert_eq!(summarize_day(1), "1 event");
            assert_eq!(summarize_day(7), "7 events");
        }
    }

    mod focus {
        use super::*;

        fn agenda() -> Vec<Event> {
            vec![
                event_at("a", "2024-02-12T09:00:00Z"),
                event_at("b", "2024-02-12T11:00:00Z"),
                event_at("c", "2024-02-13T09:00:00Z"),
            ]
        }

        #[test]
        fn picks_next_upcoming() {
            let focus = find_focus_event_id(&agenda(), utc(2024, 2, 12, 10, 0, 0));
            assert_eq!(focus.as_deref(), Some("b"));
        }

        #[test]
        fn start_equal_to_now_counts_as_upcoming() {
            let focus = find_focus_event_id(&agenda(), utc(2024, 2, 12, 11, 0, 0));
            assert_eq!(focus.as_deref(), Some("b"));
        }

        #[test]
        fn falls_back_to_first_when_all_past() {
            let focus = find_focus_event_id(&agenda(), utc(2024, 3, 1, 0, 0, 0));
            assert_eq!(focus.as_deref(), Some("a"));
        }

        #[test]
        fn undated_agenda_falls_back_to_first() {
            let agenda = vec![Event::new("x", "X"), Event::new("y", "Y")];
            let focus = find_focus_event_id(&agenda, utc(2024, 2, 12, 0, 0, 0));
            assert_eq!(focus.as_deref(), Some("x"));
        }

        #[test]
        fn empty_agenda_has_no_focus() {
            assert_eq!(find_focus_event_id(&[], utc(2024, 2, 12, 0, 0, 0)), None);
        }
    }

    mod totals {
        use super::*;

        #[test]
        fn tally_by_label() {
            let agenda = vec![
                event_at("a", "2024-02-12T09:00:00Z").with_status("confirmed"),
                event_at("b", "2024-02-12T10:00:00Z").with_status("CONFIRMED"),
                event_at("c", "2024-02-12T11:00:00Z"),
            ];
            let totals = compute_totals(&agenda);
            assert_eq!(totals.count, 3);
            assert_eq!(totals.statuses.get("Confirmed"), Some(&2));
            assert_eq!(totals.statuses.get("Scheduled"), Some(&1));
        }

        #[test]
        fn empty() {
            let totals = compute_totals(&[]);
            assert_eq!(totals, Totals::default());
        }
    }

    mod building {
        use super::*;

        fn now() -> DateTime<Utc> {
            utc(2024, 2, 12, 8, 0, 0)
        }

        #[test]
        fn non_object_payload_yields_none() {
            assert!(build_calendar(&json!(null), now()).is_none());
            assert!(build_calendar(&json!([]), now()).is_none());
            assert!(build_calendar(&json!("week"), now()).is_none());
        }

        #[test]
        fn empty_object_yields_empty_calendar() {
            let calendar = build_calendar(&json!({}), now()).unwrap();
            assert!(calendar.days.is_empty());
            assert!(calendar.is_empty());
            assert_eq!(calendar.focus_event_id, None);
            assert_eq!(calendar.range, WindowRange::default());
        }

        #[test]
        fn range_and_generated_at_are_carried() {
            let calendar = build_calendar(
                &json!({
                    "generatedAt": "2024-02-11T22:00:00Z",
                    "range": {
                        "label": "Week of 12 Feb 2024 – 16 Feb 2024",
                        "start": "2024-02-12",
                        "previousStart": "2024-02-05",
                        "nextStart": "2024-02-19"
                    }
                }),
                now(),
            )
            .unwrap();
            assert_eq!(calendar.generated_at.as_deref(), Some("2024-02-11T22:00:00Z"));
            assert_eq!(calendar.range.start.as_deref(), Some("2024-02-12"));
            assert_eq!(calendar.range.next_start.as_deref(), Some("2024-02-19"));
            assert_eq!(calendar.range.end, None);
        }

        #[test]
        fn malformed_range_is_defaulted() {
            let calendar = build_calendar(&json!({"range": "this week"}), now()).unwrap();
            assert_eq!(calendar.range, WindowRange::default());
        }

        #[test]
        fn days_are_kept_sorted_and_labelled() {
            let calendar = build_calendar(
                &json!({
                    "days": [
                        {"date": "2024-02-13", "events": []},
                        {"date": "2024-02-12", "label": "Monday", "events": [
                            {"id": "late", "title": "Event late", "start": "2024-02-12T15:00:00Z"},
                            {"id": "early", "title": "Event early", "start": "2024-02-12T09:00:00Z"},
                            "junk"
                        ]},
                        {"label": "no date"},
                        42
                    ]
                }),
                now(),
            )
            .unwrap();

            assert_eq!(calendar.days.len(), 2);
            let monday = &calendar.days[0];
            assert_eq!(monday.date, "2024-02-12");
            assert_eq!(monday.label, "Monday");
            assert!(monday.is_today);
            assert_eq!(monday.summary, "2 events");
            assert_eq!(monday.events[0].id, "early");

            let tuesday = &calendar.days[1];
            assert_eq!(tuesday.label, "Tue 13 Feb");
            assert!(!tuesday.is_today);
            assert!(tuesday.is_empty());
            assert_eq!(tuesday.summary, "No events scheduled");
        }

        #[test]
        fn supplied_is_today_is_honoured() {
            let calendar = build_calendar(
                &json!({"days": [{"date": "2024-02-12", "isToday": false}]}),
                now(),
            )
            .unwrap();
            assert!(!calendar.days[0].is_today);
            assert!(calendar.today().is_none());
        }

        #[test]
        fn agenda_is_derived_from_days() {
            let calendar = build_calendar(
                &json!({
                    "days": [
                        {"date": "2024-02-13", "events": [{"id": "tue", "title": "Event tue", "start": "2024-02-13T09:00:00Z"}]},
                        {"date": "2024-02-12", "events": [{"id": "mon", "title": "Event mon", "start": "2024-02-12T09:00:00Z"}]}
                    ]
                }),
                now(),
            )
            .unwrap();
            let ids: Vec<_> = calendar.agenda.iter().map(|e| e.id.as_str()).collect();
            assert_eq!(ids, vec!["mon", "tue"]);
        }

        #[test]
        fn supplied_agenda_wins_and_is_resorted() {
            let calendar = build_calendar(
                &json!({
                    "days": [
                        {"date": "2024-02-12", "events": [{"id": "day-only", "title": "Event day-only", "start": "2024-02-12T09:00:00Z"}]}
                    ],
                    "agenda": [
                        {"id": "second", "title": "Event second", "start": "2024-02-12T14:00:00Z"},
                        {"id": "first", "title": "Event first", "start": "2024-02-12T10:00:00Z"},
                        {"id": "floating", "title": "Event floating"}
                    ]
                }),
                now(),
            )
            .unwrap();
            let ids: Vec<_> = calendar.agenda.iter().map(|e| e.id.as_str()).collect();
            assert_eq!(ids, vec!["first", "second", "floating"]);
            assert_eq!(calendar.totals.count, 3);
            assert!(calendar.event("day-only").is_none());
        }

        #[test]
        fn supplied_focus_is_honoured_when_present() {
            let calendar = build_calendar(
                &json!({
                    "agenda": [
                        {"id": "a", "title": "Event a", "start": "2024-02-12T09:00:00Z"},
                        {"id": "b", "title": "Event b", "start": "2024-02-12T10:00:00Z"}
                    ],
                    "focusEventId": "b"
                }),
                now(),
            )
            .unwrap();
            assert_eq!(calendar.focus_event_id.as_deref(), Some("b"));
            assert_eq!(calendar.focus_event().map(|e| e.id.as_str()), Some("b"));
        }

        #[test]
        fn foreign_focus_is_recomputed() {
            let calendar = build_calendar(
                &json!({
                    "agenda": [
                        {"id": "a", "title": "Event a", "start": "2024-02-12T09:00:00Z"},
                        {"id": "b", "title": "Event b", "start": "2024-02-12T10:00:00Z"}
                    ],
                    "focusEventId": "stale-id"
                }),
                now(),
            )
            .unwrap();
            assert_eq!(calendar.focus_event_id.as_deref(), Some("a"));
        }

        #[test]
        fn lookup_helpers() {
            let calendar = build_calendar(
                &json!({
                    "days": [{"date": "2024-02-12", "events": [{"id": "a", "title": "Event a", "start": "2024-02-12T09:00:00Z"}]}]
                }),
                now(),
            )
            .unwrap();
            assert!(calendar.day("2024-02-12").is_some());
            assert!(calendar.day("2024-02-19").is_none());
            assert_eq!(calendar.event("a").unwrap().time_label.as_deref(), Some("09:00"));
            assert_eq!(calendar.today().unwrap().date, "2024-02-12");
        }
    }

    #[test]
    fn calendar_new_derives_everything() {
        let now = utc(2024, 2, 12, 10, 0, 0);
        let days = vec![
            Day::new("2024-02-13", "Tue 13 Feb", false, vec![]),
            Day::new(
                "2024-02-12",
                "Mon 12 Feb",
                true,
                vec![event_at("a", "2024-02-12T11:00:00Z")],
            ),
        ];
        let agenda = vec![event_at("a", "2024-02-12T11:00:00Z")];
        let calendar = Calendar::new(WindowRange::default(), days, agenda, now);

        assert_eq!(calendar.days[0].date, "2024-02-12");
        assert_eq!(calendar.totals.count, 1);
        assert_eq!(calendar.focus_event_id.as_deref(), Some("a"));
    }
}
