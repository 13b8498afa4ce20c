use chrono::{DateTime, NaiveDate, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_PENDING: &str = "PENDING";
pub const STATUS_CONFIRMED: &str = "CONFIRMED";
pub const STATUS_CANCELLED: &str = "CANCELLED";

/// An appointment at one slot. The data layer enforces that at most one
/// non-cancelled booking exists per (barber_id, date, time).
/// `created_by_user_id` records which staff member entered the booking for
/// audit only; it never participates in duplicate prevention, so staff can
/// hold any number of same-day bookings for different walk-in customers.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub barber_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub note: Option<String>,
    pub status: String,
    pub created_by_user_id: Option<String>,
    pub management_token: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub barber_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub note: Option<String>,
    pub created_by_user_id: Option<String>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(48)
            .map(char::from)
            .collect();

        Self {
            id: Uuid::new_v4().to_string(),
            barber_id: params.barber_id,
            date: params.date,
            time: params.time,
            customer_name: params.customer_name,
            customer_phone: params.customer_phone,
            customer_email: params.customer_email,
            note: params.note,
            status: STATUS_CONFIRMED.to_string(),
            created_by_user_id: params.created_by_user_id,
            management_token: token,
            created_at: Utc::now(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == STATUS_CANCELLED
    }
}
