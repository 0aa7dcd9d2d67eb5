//! Wall-clock input and output.
//!
//! Travelers report progress as a bare "HH:MM". The date is taken from
//! whichever day puts that clock time closest to an anchor instant, so a
//! report of "00:10" near a 23:50 plan lands after midnight.

use chrono::{DateTime, Days, FixedOffset, NaiveTime, TimeZone, Utc};

use crate::error::ValidationError;

/// Resolve an "HH:MM" clock time near `anchor`, read in `offset`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidClockTime`] if the input is not a
/// valid 24-hour time.
pub fn resolve_clock_time(
    input: &str,
    anchor: DateTime<Utc>,
    offset: FixedOffset,
) -> Result<DateTime<Utc>, ValidationError> {
    let invalid = || ValidationError::InvalidClockTime(input.to_string());
    let time = NaiveTime::parse_from_str(input.trim(), "%H:%M").map_err(|_| invalid())?;

    let anchor_date = anchor.with_timezone(&offset).date_naive();
    let candidates = [
        anchor_date.checked_sub_days(Days::new(1)),
        Some(anchor_date),
        anchor_date.checked_add_days(Days::new(1)),
    ];

    candidates
        .into_iter()
        .flatten()
        .filter_map(|date| offset.from_local_datetime(&date.and_time(time)).single())
        .map(|local| local.with_timezone(&Utc))
        .min_by_key(|candidate| (*candidate - anchor).num_seconds().abs())
        .ok_or_else(invalid)
}

/// Format an instant as a clock time in `offset`.
pub fn format_clock(instant: DateTime<Utc>, offset: FixedOffset, twenty_four_hour: bool) -> String {
    let local = instant.with_timezone(&offset);
    if twenty_four_hour {
        local.format("%H:%M").to_string()
    } else {
        local.format("%-I:%M %p").to_string()
    }
}
