use barbershop_backend::{
    api::router::create_router,
    config::Config,
    domain::models::waitlist::{SlotFreed, WaitlistEntry},
    domain::ports::NotificationDispatcher,
    domain::services::materializer::Materializer,
    domain::services::waitlist_service::{WaitlistMode, WaitlistService},
    error::AppError,
    infra::repositories::{
        sqlite_barber_repo::SqliteBarberRepo, sqlite_booking_repo::SqliteBookingRepo,
        sqlite_closure_repo::SqliteClosureRepo, sqlite_schedule_repo::SqliteScheduleRepo,
        sqlite_waitlist_repo::SqliteWaitlistRepo,
    },
    state::AppState,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RecordedNotification {
    pub customer_name: String,
    pub time: String,
    pub date: String,
}

/// Records every dispatch instead of calling an external channel.
pub struct MockNotifier {
    pub sent: Arc<Mutex<Vec<RecordedNotification>>>,
}

#[async_trait]
impl NotificationDispatcher for MockNotifier {
    async fn notify_slot_freed(
        &self,
        entry: &WaitlistEntry,
        freed: &SlotFreed,
    ) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(RecordedNotification {
            customer_name: entry.customer_name.clone(),
            time: freed.time.clone(),
            date: freed.date.to_string(),
        });
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub notifications: Arc<Mutex<Vec<RecordedNotification>>>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_waitlist_mode("BROADCAST").await
    }

    pub async fn with_waitlist_mode(mode: &str) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            notifier_url: "http://localhost".to_string(),
            notifier_token: "token".to_string(),
            shop_timezone: "UTC".to_string(),
            materialize_window_days: 14,
            waitlist_mode: mode.to_string(),
            offer_expiry_min: 60,
        };

        let barber_repo = Arc::new(SqliteBarberRepo::new(pool.clone()));
        let schedule_repo = Arc::new(SqliteScheduleRepo::new(pool.clone()));
        let closure_repo = Arc::new(SqliteClosureRepo::new(pool.clone()));
        let booking_repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
        let waitlist_repo = Arc::new(SqliteWaitlistRepo::new(pool.clone()));

        let notifications = Arc::new(Mutex::new(Vec::new()));
        let notifier = Arc::new(MockNotifier {
            sent: notifications.clone(),
        });

        let materializer = Arc::new(Materializer::new(
            barber_repo.clone(),
            schedule_repo.clone(),
            closure_repo.clone(),
        ));
        let waitlist_mode: WaitlistMode = mode.parse().unwrap();
        let waitlist_service = Arc::new(WaitlistService::new(
            waitlist_repo.clone(),
            booking_repo.clone(),
            notifier.clone(),
            waitlist_mode,
            config.offer_expiry_min,
        ));

        let state = Arc::new(AppState {
            config,
            barber_repo,
            schedule_repo,
            closure_repo,
            booking_repo,
            waitlist_repo,
            notifier,
            materializer,
            waitlist_service,
        });

        // No background worker in tests: the materializer is triggered
        // through the admin endpoint so runs stay deterministic.
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            notifications,
        }
    }

    pub async fn post(&self, uri: &str, payload: Value) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn put(&self, uri: &str, payload: Value) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn delete(&self, uri: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn create_barber(&self, name: &str, preset: &str) -> String {
        let res = self
            .post(
                "/api/v1/barbers",
                json!({
                    "name": name,
                    "email": format!("{}@shop.example", name),
                    "pattern_preset": preset
                }),
            )
            .await;
        assert!(res.status().is_success(), "barber create failed");
        let body = parse_body(res).await;
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn book(
        &self,
        barber_id: &str,
        date: &str,
        time: &str,
        customer: &str,
    ) -> axum::response::Response {
        self.post(
            &format!("/api/v1/barbers/{}/bookings", barber_id),
            json!({
                "date": date,
                "time": time,
                "customer_name": customer,
                "customer_phone": "3331112222"
            }),
        )
        .await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// First date strictly after today falling on `weekday`; keeps booking
/// times safely in the future.
pub fn next_weekday(weekday: Weekday) -> NaiveDate {
    let mut date = Utc::now().date_naive() + Duration::days(1);
    while date.weekday() != weekday {
        date += Duration::days(1);
    }
    date
}

#[allow(dead_code)]
pub fn fmt(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
