use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Materialized schedule row for one (barber, date). `available_slots_json`
/// holds the base slot labels laid down at materialization time;
/// `unavailable_slots_json` holds labels a barber blocked by hand without a
/// closure record. `is_exception` marks a day the barber explicitly reopened
/// against their weekly pattern; the materializer never re-closes it.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ScheduleDay {
    pub id: String,
    pub barber_id: String,
    pub date: NaiveDate,
    pub available_slots_json: String,
    pub unavailable_slots_json: String,
    pub day_off: bool,
    pub is_exception: bool,
    pub created_at: DateTime<Utc>,
}

impl ScheduleDay {
    pub fn new(barber_id: String, date: NaiveDate, slots: &[String]) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            barber_id,
            date,
            available_slots_json: serde_json::to_string(slots)
                .unwrap_or_else(|_| "[]".to_string()),
            unavailable_slots_json: "[]".to_string(),
            day_off: false,
            is_exception: false,
            created_at: Utc::now(),
        }
    }

    pub fn available_slots(&self) -> Vec<String> {
        serde_json::from_str(&self.available_slots_json).unwrap_or_default()
    }

    pub fn unavailable_slots(&self) -> Vec<String> {
        serde_json::from_str(&self.unavailable_slots_json).unwrap_or_default()
    }
}
