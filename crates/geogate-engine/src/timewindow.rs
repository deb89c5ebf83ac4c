//! # Time-Window Matching
//!
//! Recurring wall-clock blackout windows, anchored in each window's IANA
//! timezone and evaluated at the request timestamp. A window whose start
//! is later than its end spans midnight: `22:00–06:00` covers 22:00 today
//! through 06:00 tomorrow.
//!
//! Boundary comparison is inclusive on both ends, so a request at exactly
//! `06:00` still matches a `22:00–06:00` window; its `expires_at` then
//! rolls to the following day's `06:00`.

use chrono::{DateTime, Datelike, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

use geogate_rules::TimeRestriction;

use crate::error::EngineError;

fn evaluation_fault(e: impl std::fmt::Display) -> EngineError {
    EngineError::Evaluation {
        reason: e.to_string(),
    }
}

fn minute_of_day(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

/// Check whether `window` is in force at instant `at`.
///
/// Returns `Ok(Some(expires_at))` with the next occurrence of the window's
/// end time (in UTC) when the window matches, `Ok(None)` when it does not.
///
/// # Errors
///
/// [`EngineError::Evaluation`] if the window carries an unparseable
/// boundary or timezone, or the end time cannot be placed on any nearby
/// day (pathological DST data). Store validation keeps such windows out;
/// this guards records that arrived around it.
pub fn window_applies(
    window: &TimeRestriction,
    at: DateTime<Utc>,
) -> Result<Option<DateTime<Utc>>, EngineError> {
    let tz = window.tz().map_err(evaluation_fault)?;
    let start = window.start().map_err(evaluation_fault)?;
    let end = window.end().map_err(evaluation_fault)?;

    let local = at.with_timezone(&tz);
    let minute = local.hour() * 60 + local.minute();
    let start_minute = minute_of_day(start);
    let end_minute = minute_of_day(end);

    // start > end spans midnight.
    let in_window = if start_minute <= end_minute {
        minute >= start_minute && minute <= end_minute
    } else {
        minute >= start_minute || minute <= end_minute
    };

    let day = local.weekday().num_days_from_sunday() as u8;
    if !in_window || !window.days_of_week.contains(&day) {
        return Ok(None);
    }

    let expires_at = next_window_end(tz, end, local).ok_or_else(|| EngineError::Evaluation {
        reason: format!(
            "cannot place window end {} on any nearby day in {}",
            window.end_time, window.timezone
        ),
    })?;
    Ok(Some(expires_at))
}

/// The next strictly-future occurrence of `end` in `tz`, rolled to the
/// following day when today's occurrence has already passed (or falls into
/// a DST gap).
fn next_window_end(tz: Tz, end: NaiveTime, now: DateTime<Tz>) -> Option<DateTime<Utc>> {
    use chrono::TimeZone;

    let mut date = now.date_naive();
    // Two days always contain the next end; a third absorbs a DST gap.
    for _ in 0..3 {
        if let Some(candidate) = tz.from_local_datetime(&date.and_time(end)).earliest() {
            if candidate > now {
                return Some(candidate.with_timezone(&Utc));
            }
        }
        date = date.succ_opt()?;
    }
    None
}
