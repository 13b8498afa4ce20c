use crate::domain::services::availability::{DayAvailability, SlotStatus};
use serde::Serialize;

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub date: String,
    pub available_count: usize,
    pub slots: Vec<SlotStatus>,
}

#[derive(Serialize)]
pub struct RangeAvailabilityResponse {
    pub days: Vec<DayAvailability>,
}
