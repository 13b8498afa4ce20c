use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const WL_WAITING: &str = "WAITING";
pub const WL_OFFERED: &str = "OFFERED";
pub const WL_NOTIFIED: &str = "NOTIFIED";
pub const WL_APPROVED: &str = "APPROVED";
pub const WL_DECLINED: &str = "DECLINED";
pub const WL_EXPIRED: &str = "EXPIRED";

/// FIFO queue entry for a customer wanting a fully-booked (barber, date).
/// `position` is 1-based among WAITING entries and is compacted whenever an
/// entry leaves the WAITING state. `offer_time` is the freed slot label the
/// customer was offered or notified about.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct WaitlistEntry {
    pub id: String,
    pub barber_id: String,
    pub date: NaiveDate,
    pub customer_name: String,
    pub customer_phone: String,
    pub position: i64,
    pub status: String,
    pub offer_time: Option<String>,
    pub offer_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl WaitlistEntry {
    pub fn new(
        barber_id: String,
        date: NaiveDate,
        customer_name: String,
        customer_phone: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            barber_id,
            date,
            customer_name,
            customer_phone,
            position: 0,
            status: WL_WAITING.to_string(),
            offer_time: None,
            offer_expires_at: None,
            created_at: Utc::now(),
        }
    }
}

/// Emitted when a cancellation frees a slot; consumed by the waitlist
/// service, which hands it to the external notification channel.
#[derive(Debug, Serialize, Clone)]
pub struct SlotFreed {
    pub barber_id: String,
    pub date: NaiveDate,
    pub time: String,
}
