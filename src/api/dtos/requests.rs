use crate::domain::models::barber::WeekPattern;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateBarberRequest {
    pub name: String,
    pub email: String,
    /// Explicit weekly pattern; mutually exclusive with `pattern_preset`.
    pub pattern: Option<WeekPattern>,
    /// One of "standard", "late_monday", "extended".
    pub pattern_preset: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateBarberRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub active: Option<bool>,
    pub pattern: Option<WeekPattern>,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub date: String,
    pub time: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub note: Option<String>,
    /// Staff member entering a walk-in booking; audit only, never a
    /// duplicate-prevention key.
    pub created_by_user_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateClosureRequest {
    pub date: String,
    pub closure_type: String,
    pub reason: Option<String>,
    pub created_by: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateRecurringClosureRequest {
    /// 0 = Monday .. 6 = Sunday.
    pub weekday: i32,
    pub closure_type: String,
}

#[derive(Deserialize)]
pub struct UpdateScheduleDayRequest {
    pub unavailable_slots: Option<Vec<String>>,
    pub day_off: Option<bool>,
}

#[derive(Deserialize)]
pub struct JoinWaitlistRequest {
    pub date: String,
    pub customer_name: String,
    pub customer_phone: String,
}

#[derive(Deserialize)]
pub struct WaitlistResponseRequest {
    /// "ACCEPT" or "DECLINE".
    pub action: String,
}
