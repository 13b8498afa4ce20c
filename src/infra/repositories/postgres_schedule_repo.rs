use crate::domain::{models::schedule::ScheduleDay, ports::ScheduleRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct PostgresScheduleRepo {
    pool: PgPool,
}

impl PostgresScheduleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleRepository for PostgresScheduleRepo {
    async fn insert_if_absent(&self, day: &ScheduleDay) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO schedule_days
             (id, barber_id, date, available_slots_json, unavailable_slots_json, day_off, is_exception, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (barber_id, date) DO NOTHING",
        )
        .bind(&day.id)
        .bind(&day.barber_id)
        .bind(day.date)
        .bind(&day.available_slots_json)
        .bind(&day.unavailable_slots_json)
        .bind(day.day_off)
        .bind(day.is_exception)
        .bind(day.created_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_date(
        &self,
        barber_id: &str,
        date: NaiveDate,
    ) -> Result<Option<ScheduleDay>, AppError> {
        sqlx::query_as::<_, ScheduleDay>(
            "SELECT * FROM schedule_days WHERE barber_id = $1 AND date = $2",
        )
        .bind(barber_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_by_range(
        &self,
        barber_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduleDay>, AppError> {
        sqlx::query_as::<_, ScheduleDay>(
            "SELECT * FROM schedule_days WHERE barber_id = $1 AND date >= $2 AND date <= $3 ORDER BY date ASC",
        )
        .bind(barber_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update_manual_state(
        &self,
        barber_id: &str,
        date: NaiveDate,
        unavailable_slots_json: Option<&str>,
        day_off: Option<bool>,
    ) -> Result<ScheduleDay, AppError> {
        sqlx::query_as::<_, ScheduleDay>(
            "UPDATE schedule_days SET
             unavailable_slots_json = COALESCE($1, unavailable_slots_json),
             day_off = COALESCE($2, day_off)
             WHERE barber_id = $3 AND date = $4
             RETURNING *",
        )
        .bind(unavailable_slots_json)
        .bind(day_off)
        .bind(barber_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Schedule day not found".into()))
    }

    async fn mark_exception(&self, barber_id: &str, date: NaiveDate) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE schedule_days SET is_exception = TRUE, day_off = FALSE
             WHERE barber_id = $1 AND date = $2",
        )
        .bind(barber_id)
        .bind(date)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Schedule day not found".into()));
        }
        Ok(())
    }
}
