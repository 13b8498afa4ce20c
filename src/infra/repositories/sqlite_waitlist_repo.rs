use crate::domain::{models::waitlist::WaitlistEntry, ports::WaitlistRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

pub struct SqliteWaitlistRepo {
    pool: SqlitePool,
}

impl SqliteWaitlistRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WaitlistRepository for SqliteWaitlistRepo {
    async fn enqueue(&self, entry: &WaitlistEntry) -> Result<WaitlistEntry, AppError> {
        // position assigned inside the insert so concurrent joins cannot
        // pick the same tail slot
        sqlx::query_as::<_, WaitlistEntry>(
            "INSERT INTO waitlist_entries
             (id, barber_id, date, customer_name, customer_phone, position, status, offer_time, offer_expires_at, created_at)
             VALUES (?, ?, ?, ?, ?,
                 (SELECT COALESCE(MAX(position), 0) + 1 FROM waitlist_entries
                  WHERE barber_id = ? AND date = ? AND status = 'WAITING'),
                 ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&entry.id)
        .bind(&entry.barber_id)
        .bind(entry.date)
        .bind(&entry.customer_name)
        .bind(&entry.customer_phone)
        .bind(&entry.barber_id)
        .bind(entry.date)
        .bind(&entry.status)
        .bind(&entry.offer_time)
        .bind(entry.offer_expires_at)
        .bind(entry.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<WaitlistEntry>, AppError> {
        sqlx::query_as::<_, WaitlistEntry>("SELECT * FROM waitlist_entries WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_date(
        &self,
        barber_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<WaitlistEntry>, AppError> {
        sqlx::query_as::<_, WaitlistEntry>(
            "SELECT * FROM waitlist_entries WHERE barber_id = ? AND date = ? ORDER BY created_at ASC",
        )
        .bind(barber_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_waiting(
        &self,
        barber_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<WaitlistEntry>, AppError> {
        sqlx::query_as::<_, WaitlistEntry>(
            "SELECT * FROM waitlist_entries
             WHERE barber_id = ? AND date = ? AND status = 'WAITING'
             ORDER BY position ASC",
        )
        .bind(barber_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update_offer(
        &self,
        id: &str,
        status: &str,
        offer_time: Option<&str>,
        offer_expires_at: Option<DateTime<Utc>>,
    ) -> Result<WaitlistEntry, AppError> {
        sqlx::query_as::<_, WaitlistEntry>(
            "UPDATE waitlist_entries SET status = ?, offer_time = ?, offer_expires_at = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(status)
        .bind(offer_time)
        .bind(offer_expires_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Waitlist entry not found".into()))
    }

    async fn compact_positions(
        &self,
        barber_id: &str,
        date: NaiveDate,
        departed_position: i64,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE waitlist_entries SET position = position - 1
             WHERE barber_id = ? AND date = ? AND status = 'WAITING' AND position > ?",
        )
        .bind(barber_id)
        .bind(date)
        .bind(departed_position)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(())
    }

    async fn list_expired_offers(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<WaitlistEntry>, AppError> {
        sqlx::query_as::<_, WaitlistEntry>(
            "SELECT * FROM waitlist_entries
             WHERE status = 'OFFERED' AND offer_expires_at IS NOT NULL AND offer_expires_at < ?",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
