use crate::domain::models::barber::Barber;
use crate::domain::models::booking::Booking;
use crate::domain::models::closure::{
    ClosureType, RecurringClosure, RemovedAutoClosure, SpecificClosure,
};
use crate::domain::models::schedule::ScheduleDay;
use crate::domain::services::closures::{decide, ClosureDecision};
use crate::domain::services::slots::base_slots;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// The fixed boundary between "morning" and "afternoon" closures. Slots
/// starting before 14:00 are morning slots, everything else afternoon,
/// independent of a barber's actual window times.
pub const AFTERNOON_BOUNDARY_HOUR: u32 = 14;

#[derive(Debug, Serialize, Clone)]
pub struct SlotStatus {
    pub time: String,
    pub available: bool,
}

#[derive(Debug, Serialize, Clone)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub has_slots: bool,
    pub available_count: usize,
    pub slots: Vec<SlotStatus>,
}

pub fn slot_hour(label: &str) -> u32 {
    label
        .split(':')
        .next()
        .and_then(|h| h.parse().ok())
        .unwrap_or(0)
}

pub fn is_morning_slot(label: &str) -> bool {
    slot_hour(label) < AFTERNOON_BOUNDARY_HOUR
}

/// Pure resolution for one day: applies the closure decision, then the
/// manual unavailable set, then existing bookings, over the given base
/// slot list. Output keeps the base list's chronological order.
pub fn resolve_day(
    base: &[String],
    unavailable: &[String],
    day_off: bool,
    decision: ClosureDecision,
    bookings: &[Booking],
) -> Vec<SlotStatus> {
    base.iter()
        .map(|slot| {
            let blocked_by_closure = match decision {
                ClosureDecision::Closed(ClosureType::Full) => true,
                ClosureDecision::Closed(ClosureType::Morning) => is_morning_slot(slot),
                ClosureDecision::Closed(ClosureType::Afternoon) => !is_morning_slot(slot),
                ClosureDecision::Open => false,
            };
            let available = !day_off
                && !blocked_by_closure
                && !unavailable.contains(slot)
                && !bookings
                    .iter()
                    .any(|b| &b.time == slot && !b.is_cancelled());
            SlotStatus {
                time: slot.clone(),
                available,
            }
        })
        .collect()
}

/// Full per-day evaluation shared by the single-date and range endpoints:
/// both load rows and delegate here, so the two paths cannot drift. When no
/// schedule row was materialized for the date, the base slots are computed
/// live from the barber's pattern.
pub fn day_availability(
    barber: &Barber,
    date: NaiveDate,
    schedule: Option<&ScheduleDay>,
    specific: &[SpecificClosure],
    recurring: &[RecurringClosure],
    removed: &[RemovedAutoClosure],
    bookings: &[Booking],
) -> DayAvailability {
    let pattern = barber.pattern();
    let (base, unavailable, day_off) = match schedule {
        Some(day) => (day.available_slots(), day.unavailable_slots(), day.day_off),
        None => (base_slots(&pattern, date.weekday()), Vec::new(), false),
    };

    let decision = decide(date, specific, recurring, removed, schedule);
    let slots = resolve_day(&base, &unavailable, day_off, decision, bookings);
    let available_count = slots.iter().filter(|s| s.available).count();

    DayAvailability {
        date,
        has_slots: available_count > 0,
        available_count,
        slots,
    }
}
