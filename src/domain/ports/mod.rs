use crate::domain::models::{
    barber::Barber,
    booking::Booking,
    closure::{RecurringClosure, RemovedAutoClosure, SpecificClosure},
    schedule::ScheduleDay,
    waitlist::{SlotFreed, WaitlistEntry},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

#[async_trait]
pub trait BarberRepository: Send + Sync {
    async fn create(&self, barber: &Barber) -> Result<Barber, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Barber>, AppError>;
    async fn list(&self) -> Result<Vec<Barber>, AppError>;
    async fn list_active(&self) -> Result<Vec<Barber>, AppError>;
    async fn update(&self, barber: &Barber) -> Result<Barber, AppError>;
}

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Insert-if-absent; returns true when a row was created. Existing rows
    /// are never overwritten so manual edits survive re-materialization.
    async fn insert_if_absent(&self, day: &ScheduleDay) -> Result<bool, AppError>;
    async fn find_by_date(
        &self,
        barber_id: &str,
        date: NaiveDate,
    ) -> Result<Option<ScheduleDay>, AppError>;
    async fn list_by_range(
        &self,
        barber_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduleDay>, AppError>;
    async fn update_manual_state(
        &self,
        barber_id: &str,
        date: NaiveDate,
        unavailable_slots_json: Option<&str>,
        day_off: Option<bool>,
    ) -> Result<ScheduleDay, AppError>;
    async fn mark_exception(&self, barber_id: &str, date: NaiveDate) -> Result<(), AppError>;
}

#[async_trait]
pub trait ClosureRepository: Send + Sync {
    /// Admin/barber closure write; keyed upsert so re-submitting a closure
    /// refreshes its reason instead of erroring.
    async fn upsert_specific(&self, closure: &SpecificClosure)
        -> Result<SpecificClosure, AppError>;
    /// Insert-if-absent keyed on (barber, date, type); returns true when a
    /// row was created.
    async fn insert_specific_if_absent(
        &self,
        closure: &SpecificClosure,
    ) -> Result<bool, AppError>;
    async fn find_specific_by_date(
        &self,
        barber_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<SpecificClosure>, AppError>;
    async fn list_specific_by_range(
        &self,
        barber_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SpecificClosure>, AppError>;
    async fn delete_specific(
        &self,
        barber_id: &str,
        date: NaiveDate,
        closure_type: &str,
    ) -> Result<(), AppError>;

    async fn create_recurring(
        &self,
        closure: &RecurringClosure,
    ) -> Result<RecurringClosure, AppError>;
    async fn list_recurring(&self, barber_id: &str) -> Result<Vec<RecurringClosure>, AppError>;
    async fn delete_recurring(&self, barber_id: &str, id: &str) -> Result<(), AppError>;

    /// Ledger write; idempotent on (barber, date, type).
    async fn record_removed_auto(&self, entry: &RemovedAutoClosure) -> Result<(), AppError>;
    async fn find_removed_auto_by_date(
        &self,
        barber_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<RemovedAutoClosure>, AppError>;
    async fn list_removed_auto_by_range(
        &self,
        barber_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RemovedAutoClosure>, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// The partial unique index on (barber_id, date, time) for non-cancelled
    /// rows is the authoritative conflict guard; a violation surfaces as a
    /// database error mapped to 409 upstream.
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<Booking>, AppError>;
    async fn list_active_by_date(
        &self,
        barber_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Booking>, AppError>;
    async fn list_active_by_range(
        &self,
        barber_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Booking>, AppError>;
    async fn list_by_date(
        &self,
        barber_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Booking>, AppError>;
    /// Transitions a non-cancelled booking to CANCELLED; errors if it is
    /// already cancelled.
    async fn cancel(&self, id: &str) -> Result<Booking, AppError>;
}

#[async_trait]
pub trait WaitlistRepository: Send + Sync {
    /// Appends the entry at the tail of the WAITING queue for its
    /// (barber, date), assigning the next position atomically.
    async fn enqueue(&self, entry: &WaitlistEntry) -> Result<WaitlistEntry, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<WaitlistEntry>, AppError>;
    async fn list_by_date(
        &self,
        barber_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<WaitlistEntry>, AppError>;
    /// WAITING entries in FIFO position order.
    async fn list_waiting(
        &self,
        barber_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<WaitlistEntry>, AppError>;
    async fn update_offer(
        &self,
        id: &str,
        status: &str,
        offer_time: Option<&str>,
        offer_expires_at: Option<DateTime<Utc>>,
    ) -> Result<WaitlistEntry, AppError>;
    /// Decrements the position of every WAITING entry behind the departed
    /// one, keeping positions dense.
    async fn compact_positions(
        &self,
        barber_id: &str,
        date: NaiveDate,
        departed_position: i64,
    ) -> Result<(), AppError>;
    async fn list_expired_offers(&self, now: DateTime<Utc>)
        -> Result<Vec<WaitlistEntry>, AppError>;
}

/// Boundary to the external notification channel. Delivery mechanics are
/// out of scope; the service hands over the freed slot and moves on.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn notify_slot_freed(
        &self,
        entry: &WaitlistEntry,
        freed: &SlotFreed,
    ) -> Result<(), AppError>;
}
