//! Monday-to-Friday working weeks.

use chrono::{Datelike, Duration, NaiveDate};
use diary_core::WindowRange;
use diary_core::time::{TIME_RANGE_SEPARATOR, day_key};

/// Number of days in a working week.
pub const WORKING_DAYS: i64 = 5;

/// The Monday-to-Friday week a window covers.
///
/// Weekend dates belong to the week that started on the preceding Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkingWeek {
    monday: NaiveDate,
}

impl WorkingWeek {
    /// The working week containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let offset = i64::from(date.weekday().num_days_from_monday());
        Self {
            monday: date - Duration::days(offset),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.monday
    }

    /// Friday of the week.
    pub fn end(&self) -> NaiveDate {
        self.monday + Duration::days(WORKING_DAYS - 1)
    }

    pub fn previous_start(&self) -> NaiveDate {
        self.monday - Duration::days(7)
    }

    pub fn next_start(&self) -> NaiveDate {
        self.monday + Duration::days(7)
    }

    /// Returns true if `date` falls on one of the five working days.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start() <= date && date <= self.end()
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        (0..WORKING_DAYS)
            .map(|offset| self.monday + Duration::days(offset))
            .collect()
    }

    /// Display label, e.g. `Week of 12 Feb 2024 – 16 Feb 2024`.
    pub fn label(&self) -> String {
        format!(
            "Week of {}{}{}",
            self.start().format("%d %b %Y"),
            TIME_RANGE_SEPARATOR,
            self.end().format("%d %b %Y")
        )
    }

    pub fn to_range(&self) -> WindowRange {
        WindowRange {
            label: Some(self.label()),
            start: Some(day_key(self.start())),
            end: Some(day_key(self.end())),
            previous_start: Some(day_key(self.previous_start())),
            next_start: Some(day_key(self.next_start())),
        }
    }
}
