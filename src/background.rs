use crate::state::AppState;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};

const TICK_SECS: u64 = 60;

/// Long-running worker: re-materializes the schedule window once per
/// shop-local day (and on startup), and sweeps overdue waitlist offers on
/// every tick. Everything here is idempotent, so a crash-and-restart or an
/// overlapping manual trigger is harmless.
pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting background worker...");

    let mut last_materialized: Option<NaiveDate> = None;

    loop {
        let today = state.shop_today();

        if last_materialized != Some(today) {
            let span = info_span!("materializer_run", date = %today);
            let window_days = state.config.materialize_window_days;

            async {
                match state.materializer.run(today, window_days).await {
                    Ok(summary) => {
                        info!(
                            days_created = summary.days_created,
                            closures_created = summary.closures_created,
                            pairs_failed = summary.pairs_failed,
                            "scheduled materializer run complete"
                        );
                        last_materialized = Some(today);
                    }
                    Err(e) => {
                        // left unmarked so the next tick retries
                        error!("scheduled materializer run failed: {:?}", e);
                    }
                }
            }
            .instrument(span)
            .await;
        }

        match state.waitlist_service.expire_overdue_offers().await {
            Ok(0) => {}
            Ok(n) => info!(expired = n, "waitlist offers expired and advanced"),
            Err(e) => error!("waitlist offer sweep failed: {:?}", e),
        }

        sleep(Duration::from_secs(TICK_SECS)).await;
    }
}
