//! Slot date/time parsing and "already elapsed" checks.
//!
//! Slots are timezone-naive. "Past" is judged against the shop's local
//! time, taken to be the deployment host's local zone: one deployment
//! serves one shop.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Parses a `YYYY-MM-DD` date and `HH:MM` (or `HH:MM:SS`) time into a
/// naive slot instant. Returns `None` on any format mismatch.
pub fn parse_slot(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .ok()?;
    Some(date.and_time(time))
}

/// Canonical storage form of a slot: `YYYY-MM-DD` and `HH:MM`.
///
/// Slot identity is the minute. Every comparison against stored
/// appointments and blocks (including the unique active-slot index)
/// is an exact string match, so all writes and lookups must go
/// through this one spelling; `10:00` and `10:00:00` are the same
/// slot.
pub fn canonical(slot: NaiveDateTime) -> (String, String) {
    (
        slot.format("%Y-%m-%d").to_string(),
        slot.format("%H:%M").to_string(),
    )
}

/// True when the slot instant is strictly before now (shop-local).
pub fn is_past(slot: NaiveDateTime) -> bool {
    slot < Local::now().naive_local()
}
