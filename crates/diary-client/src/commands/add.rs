//! Booking a new event into its week.

use diary_core::time::parse_date;
use diary_core::{Day, Event, EventForm, PlacementError};
use serde::Serialize;

use crate::commands::Context;
use crate::error::{ClientError, ClientResult};
use crate::render::json;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Booking<'a> {
    event: &'a Event,
    day: &'a Day,
    persisted: bool,
}

/// Composes an event from `form` and places it in the week it falls in.
///
/// The booking is applied to the fetched calendar only; the diary store is
/// not written.
pub async fn add(ctx: &Context, form: &EventForm) -> ClientResult<String> {
    let event = ctx.composer.compose(form)?;
    let Some(day_key) = event.day_key.clone() else {
        return Err(PlacementError::Unplaceable { event_id: event.id }.into());
    };
    let date = parse_date(&day_key).ok_or_else(|| ClientError::NoSuchDay(day_key.clone()))?;

    let calendar = ctx.calendar(Some(date)).await?;
    let updated = calendar.insert(event.clone(), ctx.now)?;
    let day = updated
        .day(&day_key)
        .ok_or_else(|| ClientError::NoSuchDay(day_key.clone()))?;

    tracing::info!(id = %event.id, day = %day_key, "booked diary event");

    if ctx.json {
        return json(&Booking {
            event: &event,
            day,
            persisted: false,
        });
    }

    Ok(format!(
        "{}\n\nBooked {} ({}); not saved to the diary store",
        ctx.renderer.day(&updated, day),
        event.title,
        event.id
    ))
}
