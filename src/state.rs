use crate::config::Config;
use crate::domain::ports::{
    BarberRepository, BookingRepository, ClosureRepository, NotificationDispatcher,
    ScheduleRepository, WaitlistRepository,
};
use crate::domain::services::materializer::Materializer;
use crate::domain::services::waitlist_service::WaitlistService;
use chrono::NaiveDate;
use chrono_tz::Tz;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub barber_repo: Arc<dyn BarberRepository>,
    pub schedule_repo: Arc<dyn ScheduleRepository>,
    pub closure_repo: Arc<dyn ClosureRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub waitlist_repo: Arc<dyn WaitlistRepository>,
    pub notifier: Arc<dyn NotificationDispatcher>,
    pub materializer: Arc<Materializer>,
    pub waitlist_service: Arc<WaitlistService>,
}

impl AppState {
    /// Today's date in the shop's timezone; the reference point for the
    /// materializer window and past-booking checks.
    pub fn shop_today(&self) -> NaiveDate {
        let tz: Tz = self.config.shop_timezone.parse().unwrap_or(chrono_tz::UTC);
        chrono::Utc::now().with_timezone(&tz).date_naive()
    }

    pub fn shop_now_time(&self) -> chrono::NaiveTime {
        let tz: Tz = self.config.shop_timezone.parse().unwrap_or(chrono_tz::UTC);
        chrono::Utc::now().with_timezone(&tz).time()
    }
}
