use crate::domain::models::booking::{Booking, NewBookingParams};
use crate::domain::models::waitlist::{
    SlotFreed, WaitlistEntry, WL_APPROVED, WL_DECLINED, WL_EXPIRED, WL_NOTIFIED, WL_OFFERED,
};
use crate::domain::ports::{BookingRepository, NotificationDispatcher, WaitlistRepository};
use crate::error::AppError;
use chrono::{Duration, Utc};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

/// The two notification strategies present in the legacy system. Broadcast
/// notifies every waiting customer and lets the booking guard decide who
/// wins; single-offer walks the queue head by head with an expiry window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitlistMode {
    Broadcast,
    SingleOffer,
}

impl FromStr for WaitlistMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BROADCAST" => Ok(WaitlistMode::Broadcast),
            "SINGLE_OFFER" => Ok(WaitlistMode::SingleOffer),
            other => Err(format!("unknown waitlist mode: {}", other)),
        }
    }
}

pub struct WaitlistService {
    waitlist_repo: Arc<dyn WaitlistRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    mode: WaitlistMode,
    offer_expiry_min: i64,
}

impl WaitlistService {
    pub fn new(
        waitlist_repo: Arc<dyn WaitlistRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        mode: WaitlistMode,
        offer_expiry_min: i64,
    ) -> Self {
        Self {
            waitlist_repo,
            booking_repo,
            dispatcher,
            mode,
            offer_expiry_min,
        }
    }

    pub fn mode(&self) -> WaitlistMode {
        self.mode
    }

    /// Entry point for the freed-slot trigger: a booking for (barber, date,
    /// time) was cancelled. Dispatch failures are logged per entry and do
    /// not poison the rest of the queue.
    pub async fn on_slot_freed(&self, freed: &SlotFreed) -> Result<(), AppError> {
        match self.mode {
            WaitlistMode::Broadcast => self.broadcast(freed).await,
            WaitlistMode::SingleOffer => self.offer_to_head(freed).await,
        }
    }

    async fn broadcast(&self, freed: &SlotFreed) -> Result<(), AppError> {
        loop {
            let waiting = self
                .waitlist_repo
                .list_waiting(&freed.barber_id, freed.date)
                .await?;
            let Some(head) = waiting.into_iter().next() else {
                break;
            };

            if let Err(e) = self.dispatcher.notify_slot_freed(&head, freed).await {
                warn!(entry_id = %head.id, error = %e, "waitlist notification failed");
            }
            self.waitlist_repo
                .update_offer(&head.id, WL_NOTIFIED, Some(&freed.time), None)
                .await?;
            self.waitlist_repo
                .compact_positions(&freed.barber_id, freed.date, head.position)
                .await?;
            info!(entry_id = %head.id, time = %freed.time, "waitlist entry notified");
        }
        Ok(())
    }

    async fn offer_to_head(&self, freed: &SlotFreed) -> Result<(), AppError> {
        let waiting = self
            .waitlist_repo
            .list_waiting(&freed.barber_id, freed.date)
            .await?;
        let Some(head) = waiting.into_iter().next() else {
            return Ok(());
        };

        let expires_at = Utc::now() + Duration::minutes(self.offer_expiry_min);
        if let Err(e) = self.dispatcher.notify_slot_freed(&head, freed).await {
            warn!(entry_id = %head.id, error = %e, "waitlist offer notification failed");
        }
        self.waitlist_repo
            .update_offer(&head.id, WL_OFFERED, Some(&freed.time), Some(expires_at))
            .await?;
        self.waitlist_repo
            .compact_positions(&freed.barber_id, freed.date, head.position)
            .await?;
        info!(entry_id = %head.id, time = %freed.time, "waitlist offer made");
        Ok(())
    }

    /// Customer accepted an offer or notification: book the freed slot
    /// through the regular conflict guard (first-to-book wins in broadcast
    /// mode; a lost race surfaces as the usual 409).
    pub async fn accept(&self, entry: &WaitlistEntry) -> Result<Booking, AppError> {
        if entry.status != WL_OFFERED && entry.status != WL_NOTIFIED {
            return Err(AppError::Conflict(
                "Waitlist entry has no open offer".to_string(),
            ));
        }
        let time = entry
            .offer_time
            .clone()
            .ok_or_else(|| AppError::Conflict("Waitlist entry has no offered slot".to_string()))?;

        let booking = Booking::new(NewBookingParams {
            barber_id: entry.barber_id.clone(),
            date: entry.date,
            time,
            customer_name: entry.customer_name.clone(),
            customer_phone: entry.customer_phone.clone(),
            customer_email: None,
            note: None,
            created_by_user_id: None,
        });
        let created = self.booking_repo.create(&booking).await?;

        self.waitlist_repo
            .update_offer(&entry.id, WL_APPROVED, entry.offer_time.as_deref(), None)
            .await?;
        info!(entry_id = %entry.id, booking_id = %created.id, "waitlist offer approved");
        Ok(created)
    }

    /// Customer declined. In single-offer mode the freed slot falls through
    /// to the next queue head.
    pub async fn decline(&self, entry: &WaitlistEntry) -> Result<(), AppError> {
        if entry.status != WL_OFFERED && entry.status != WL_NOTIFIED {
            return Err(AppError::Conflict(
                "Waitlist entry has no open offer".to_string(),
            ));
        }
        self.waitlist_repo
            .update_offer(&entry.id, WL_DECLINED, entry.offer_time.as_deref(), None)
            .await?;
        info!(entry_id = %entry.id, "waitlist offer declined");

        if self.mode == WaitlistMode::SingleOffer
            && let Some(time) = entry.offer_time.clone()
        {
            let freed = SlotFreed {
                barber_id: entry.barber_id.clone(),
                date: entry.date,
                time,
            };
            self.offer_to_head(&freed).await?;
        }
        Ok(())
    }

    /// Sweeps overdue single-offer entries, expiring each and advancing the
    /// slot to the next waiting customer.
    pub async fn expire_overdue_offers(&self) -> Result<u32, AppError> {
        let overdue = self.waitlist_repo.list_expired_offers(Utc::now()).await?;
        let mut expired = 0;

        for entry in overdue {
            self.waitlist_repo
                .update_offer(&entry.id, WL_EXPIRED, entry.offer_time.as_deref(), None)
                .await?;
            expired += 1;
            info!(entry_id = %entry.id, "waitlist offer expired");

            if let Some(time) = entry.offer_time.clone() {
                let freed = SlotFreed {
                    barber_id: entry.barber_id.clone(),
                    date: entry.date,
                    time,
                };
                if let Err(e) = self.offer_to_head(&freed).await {
                    warn!(entry_id = %entry.id, error = %e, "failed to advance waitlist");
                }
            }
        }
        Ok(expired)
    }
}
