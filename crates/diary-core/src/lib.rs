//! Diary engine: normalization, calendar building, booking composition and
//! calendar mutation

pub mod calendar;
pub mod compose;
pub mod error;
pub mod event;
pub mod mutate;
pub mod normalize;
pub mod status;
pub mod time;
pub mod tracing;

pub use calendar::{
    Calendar, Day, Totals, WindowRange, build_calendar, compute_totals, find_focus_event_id,
    sort_events, summarize_day,
};
pub use compose::{Composer, ComposerOptions, EventForm, compose_event, parse_attendees};
pub use error::{FormField, PlacementError, ValidationError};
pub use event::{Attendee, Event, Link, PropertyRef};
pub use mutate::insert_event;
pub use normalize::{normalize_event, normalize_events};
pub use status::{EventStatus, status_label};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
