use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, PgPool, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::materializer::Materializer;
use crate::domain::services::waitlist_service::{WaitlistMode, WaitlistService};
use crate::infra::notifier::http_notifier::HttpNotifier;
use crate::infra::repositories::{
    postgres_barber_repo::PostgresBarberRepo, postgres_booking_repo::PostgresBookingRepo,
    postgres_closure_repo::PostgresClosureRepo, postgres_schedule_repo::PostgresScheduleRepo,
    postgres_waitlist_repo::PostgresWaitlistRepo, sqlite_barber_repo::SqliteBarberRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_closure_repo::SqliteClosureRepo,
    sqlite_schedule_repo::SqliteScheduleRepo, sqlite_waitlist_repo::SqliteWaitlistRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let notifier = Arc::new(HttpNotifier::new(
        config.notifier_url.clone(),
        config.notifier_token.clone(),
    ));
    let waitlist_mode: WaitlistMode = config
        .waitlist_mode
        .parse()
        .expect("WAITLIST_MODE must be BROADCAST or SINGLE_OFFER");

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let barber_repo = Arc::new(PostgresBarberRepo::new(pool.clone()));
        let schedule_repo = Arc::new(PostgresScheduleRepo::new(pool.clone()));
        let closure_repo = Arc::new(PostgresClosureRepo::new(pool.clone()));
        let booking_repo = Arc::new(PostgresBookingRepo::new(pool.clone()));
        let waitlist_repo = Arc::new(PostgresWaitlistRepo::new(pool.clone()));

        let materializer = Arc::new(Materializer::new(
            barber_repo.clone(),
            schedule_repo.clone(),
            closure_repo.clone(),
        ));
        let waitlist_service = Arc::new(WaitlistService::new(
            waitlist_repo.clone(),
            booking_repo.clone(),
            notifier.clone(),
            waitlist_mode,
            config.offer_expiry_min,
        ));

        AppState {
            config: config.clone(),
            barber_repo,
            schedule_repo,
            closure_repo,
            booking_repo,
            waitlist_repo,
            notifier,
            materializer,
            waitlist_service,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let barber_repo = Arc::new(SqliteBarberRepo::new(pool.clone()));
        let schedule_repo = Arc::new(SqliteScheduleRepo::new(pool.clone()));
        let closure_repo = Arc::new(SqliteClosureRepo::new(pool.clone()));
        let booking_repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
        let waitlist_repo = Arc::new(SqliteWaitlistRepo::new(pool.clone()));

        let materializer = Arc::new(Materializer::new(
            barber_repo.clone(),
            schedule_repo.clone(),
            closure_repo.clone(),
        ));
        let waitlist_service = Arc::new(WaitlistService::new(
            waitlist_repo.clone(),
            booking_repo.clone(),
            notifier.clone(),
            waitlist_mode,
            config.offer_expiry_min,
        ));

        AppState {
            config: config.clone(),
            barber_repo,
            schedule_repo,
            closure_repo,
            booking_repo,
            waitlist_repo,
            notifier,
            materializer,
            waitlist_service,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
