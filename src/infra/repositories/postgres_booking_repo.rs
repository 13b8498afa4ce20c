use crate::domain::{
    models::booking::{Booking, STATUS_CANCELLED},
    ports::BookingRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        // No ON CONFLICT here: a violation of the active-slot unique index
        // must surface so the caller gets the conflict response.
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings
             (id, barber_id, date, time, customer_name, customer_phone, customer_email, note, status, created_by_user_id, management_token, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING *",
        )
        .bind(&booking.id)
        .bind(&booking.barber_id)
        .bind(booking.date)
        .bind(&booking.time)
        .bind(&booking.customer_name)
        .bind(&booking.customer_phone)
        .bind(&booking.customer_email)
        .bind(&booking.note)
        .bind(&booking.status)
        .bind(&booking.created_by_user_id)
        .bind(&booking.management_token)
        .bind(booking.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE management_token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_active_by_date(
        &self,
        barber_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE barber_id = $1 AND date = $2 AND status != 'CANCELLED' ORDER BY time ASC",
        )
        .bind(barber_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_active_by_range(
        &self,
        barber_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE barber_id = $1 AND date >= $2 AND date <= $3 AND status != 'CANCELLED' ORDER BY date ASC, time ASC",
        )
        .bind(barber_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_by_date(
        &self,
        barber_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE barber_id = $1 AND date = $2 ORDER BY time ASC",
        )
        .bind(barber_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn cancel(&self, id: &str) -> Result<Booking, AppError> {
        let cancelled = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'CANCELLED' WHERE id = $1 AND status != 'CANCELLED' RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        match cancelled {
            Some(booking) => Ok(booking),
            None => {
                let existing = self.find_by_id(id).await?;
                match existing {
                    Some(b) if b.status == STATUS_CANCELLED => {
                        Err(AppError::Conflict("Booking already cancelled".into()))
                    }
                    _ => Err(AppError::NotFound("Booking not found".into())),
                }
            }
        }
    }
}
