use crate::domain::models::barber::WeekPattern;
use chrono::{NaiveTime, Timelike, Weekday};

pub const SLOT_STEP_MIN: u32 = 30;

fn minutes_of(label: &str) -> Option<u32> {
    let t = NaiveTime::parse_from_str(label, "%H:%M").ok()?;
    Some(t.hour() * 60 + t.minute())
}

fn label_of(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Canonical bookable slot labels for one weekday of a pattern. Pure and
/// total over all seven weekdays; a day without windows yields an empty
/// list. Walks each window in 30-minute steps and always includes the
/// window's closing boundary as a slot of its own.
pub fn base_slots(pattern: &WeekPattern, weekday: Weekday) -> Vec<String> {
    let mut labels = Vec::new();

    if let Some(windows) = pattern.windows_for(weekday) {
        for window in windows {
            let (Some(start), Some(end)) = (minutes_of(&window.start), minutes_of(&window.end))
            else {
                continue;
            };
            if end < start {
                continue;
            }

            let mut cursor = start;
            while cursor < end {
                labels.push(label_of(cursor));
                cursor += SLOT_STEP_MIN;
            }
            // closing boundary is always a slot, even when the stepping
            // overshoots it
            labels.push(label_of(end));
        }
    }

    labels.sort();
    labels.dedup();
    labels
}
