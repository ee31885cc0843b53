//! Read-only views of a diary window.

use chrono::NaiveDate;
use diary_core::Calendar;
use diary_core::time::day_key;
use serde::Serialize;

use crate::commands::Context;
use crate::error::{ClientError, ClientResult};
use crate::render::json;

/// The week containing `start` as a day grid.
pub async fn week(ctx: &Context, start: Option<NaiveDate>) -> ClientResult<String> {
    let calendar = ctx.calendar(start).await?;
    if ctx.json {
        return json(&calendar);
    }
    Ok(ctx.renderer.week(&calendar))
}

/// A single day with event details.
pub async fn day(ctx: &Context, date: NaiveDate) -> ClientResult<String> {
    let calendar = ctx.calendar(Some(date)).await?;
    let key = day_key(date);
    let day = calendar
        .day(&key)
        .ok_or_else(|| ClientError::NoSuchDay(key.clone()))?;
    if ctx.json {
        return json(day);
    }
    Ok(ctx.renderer.day(&calendar, day))
}

/// The week containing `start` as a flat agenda.
pub async fn agenda(ctx: &Context, start: Option<NaiveDate>) -> ClientResult<String> {
    let calendar = ctx.calendar(start).await?;
    if ctx.json {
        return json(&calendar.agenda);
    }
    Ok(ctx.renderer.agenda(&calendar))
}

/// JSON form of an imported calendar.
#[derive(Serialize)]
struct Imported<'a> {
    #[serde(flatten)]
    calendar: &'a Calendar,
    imported: bool,
}

/// Imports the week containing `start` and reports its totals.
pub async fn import(ctx: &Context, start: Option<NaiveDate>) -> ClientResult<String> {
    let payload = ctx.provider.import_window(ctx.request(start)).await?;
    let calendar = payload.to_calendar(ctx.now)?;
    if ctx.json {
        return json(&Imported {
            calendar: &calendar,
            imported: payload.imported,
        });
    }
    Ok(ctx.renderer.imported(&calendar))
}
