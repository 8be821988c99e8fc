//! Time slot planning.
//!
//! Converts a date, a start/end time window, and a slot length into an
//! ordered sequence of discrete time windows. Slot order is chronological
//! and indices are 0-based.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::Settings;

/// One fixed time window; one match can be played per court within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// 0-based index in chronological order.
    pub index: usize,
    /// Slot start instant.
    pub start: NaiveDateTime,
    /// Slot end instant.
    pub end: NaiveDateTime,
}

/// The slot sequence for one run, plus which format was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPlan {
    /// Slots in chronological order.
    pub slots: Vec<TimeSlot>,
    /// Whether the short slot length was used.
    pub used_short: bool,
}

/// Plans the slot sequence for the given settings and active roster size.
///
/// Slots of the chosen length are emitted from `start_time` as long as each
/// slot's end does not pass `end_time`. A window too small for even one
/// slot yields an empty plan; callers treat that as "no schedule
/// producible", not as an error.
pub fn plan_slots(settings: &Settings, active_players: usize) -> SlotPlan {
    let used_short = settings.uses_short_slots(active_players);
    let slot_len = Duration::minutes(settings.slot_minutes(active_players) as i64);

    let start = settings.date.and_time(settings.start_time);
    let end = settings.date.and_time(settings.end_time);

    let mut slots = Vec::new();
    let mut cursor = start;
    while cursor + slot_len <= end {
        slots.push(TimeSlot {
            index: slots.len(),
            start: cursor,
            end: cursor + slot_len,
        });
        cursor = cursor + slot_len;
    }

    SlotPlan { slots, used_short }
}
