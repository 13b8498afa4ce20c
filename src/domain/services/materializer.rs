use crate::domain::models::closure::{SpecificClosure, AUTO_CLOSURE_CREATOR};
use crate::domain::models::schedule::ScheduleDay;
use crate::domain::ports::{BarberRepository, ClosureRepository, ScheduleRepository};
use crate::domain::services::closures::weekday_index;
use crate::domain::services::slots::base_slots;
use crate::error::AppError;
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Serialize, Default, Clone)]
pub struct MaterializeSummary {
    pub window_days: i64,
    pub days_created: u32,
    pub closures_created: u32,
    pub pairs_failed: u32,
}

/// Daily batch that keeps the forward-looking schedule materialized:
/// insert-if-absent ScheduleDay rows for every active barber over the
/// rolling window, and mirror recurring rules into system-auto specific
/// closures unless the barber has explicitly reopened the date. All writes
/// are idempotent, so overlapping or repeated runs are harmless.
pub struct Materializer {
    barber_repo: Arc<dyn BarberRepository>,
    schedule_repo: Arc<dyn ScheduleRepository>,
    closure_repo: Arc<dyn ClosureRepository>,
}

impl Materializer {
    pub fn new(
        barber_repo: Arc<dyn BarberRepository>,
        schedule_repo: Arc<dyn ScheduleRepository>,
        closure_repo: Arc<dyn ClosureRepository>,
    ) -> Self {
        Self {
            barber_repo,
            schedule_repo,
            closure_repo,
        }
    }

    pub async fn run(
        &self,
        today: NaiveDate,
        window_days: i64,
    ) -> Result<MaterializeSummary, AppError> {
        let mut summary = MaterializeSummary {
            window_days,
            ..Default::default()
        };

        let barbers = self.barber_repo.list_active().await?;
        info!(
            barbers = barbers.len(),
            window_days, "materializing schedule window"
        );

        for barber in &barbers {
            let pattern = barber.pattern();
            let recurring = match self.closure_repo.list_recurring(&barber.id).await {
                Ok(rules) => rules,
                Err(e) => {
                    summary.pairs_failed += 1;
                    warn!(
                        barber_id = %barber.id,
                        error = %e,
                        "failed to load recurring closures; skipping barber"
                    );
                    continue;
                }
            };

            for offset in 0..window_days {
                let date = today + Duration::days(offset);
                let slots = base_slots(&pattern, date.weekday());
                if slots.is_empty() {
                    // globally closed day for this barber, nothing to lay down
                    continue;
                }

                if let Err(e) = self
                    .materialize_pair(barber.id.clone(), date, &slots, &recurring, &mut summary)
                    .await
                {
                    summary.pairs_failed += 1;
                    warn!(
                        barber_id = %barber.id,
                        date = %date,
                        error = %e,
                        "failed to materialize pair; continuing"
                    );
                }
            }
        }

        info!(
            days_created = summary.days_created,
            closures_created = summary.closures_created,
            pairs_failed = summary.pairs_failed,
            "materializer run finished"
        );
        Ok(summary)
    }

    async fn materialize_pair(
        &self,
        barber_id: String,
        date: NaiveDate,
        slots: &[String],
        recurring: &[crate::domain::models::closure::RecurringClosure],
        summary: &mut MaterializeSummary,
    ) -> Result<(), AppError> {
        let day = ScheduleDay::new(barber_id.clone(), date, slots);
        if self.schedule_repo.insert_if_absent(&day).await? {
            summary.days_created += 1;
        }

        let weekday = weekday_index(date.weekday());
        let due: Vec<_> = recurring.iter().filter(|r| r.weekday == weekday).collect();
        if due.is_empty() {
            return Ok(());
        }

        let schedule = self.schedule_repo.find_by_date(&barber_id, date).await?;
        if schedule.is_some_and(|s| s.is_exception) {
            return Ok(());
        }

        let removed = self
            .closure_repo
            .find_removed_auto_by_date(&barber_id, date)
            .await?;

        for rule in due {
            if removed.iter().any(|r| r.kind() == rule.kind()) {
                continue;
            }
            let closure = SpecificClosure::new(
                barber_id.clone(),
                date,
                rule.kind(),
                None,
                AUTO_CLOSURE_CREATOR.to_string(),
            );
            if self.closure_repo.insert_specific_if_absent(&closure).await? {
                summary.closures_created += 1;
            }
        }
        Ok(())
    }
}
