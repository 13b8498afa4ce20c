use crate::domain::{
    models::closure::{RecurringClosure, RemovedAutoClosure, SpecificClosure},
    ports::ClosureRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct PostgresClosureRepo {
    pool: PgPool,
}

impl PostgresClosureRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClosureRepository for PostgresClosureRepo {
    async fn upsert_specific(
        &self,
        closure: &SpecificClosure,
    ) -> Result<SpecificClosure, AppError> {
        sqlx::query_as::<_, SpecificClosure>(
            r#"INSERT INTO specific_closures (id, barber_id, date, closure_type, reason, created_by, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               ON CONFLICT (barber_id, date, closure_type) DO UPDATE SET
               reason=EXCLUDED.reason,
               created_by=EXCLUDED.created_by
               RETURNING *"#,
        )
        .bind(&closure.id)
        .bind(&closure.barber_id)
        .bind(closure.date)
        .bind(&closure.closure_type)
        .bind(&closure.reason)
        .bind(&closure.created_by)
        .bind(closure.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn insert_specific_if_absent(
        &self,
        closure: &SpecificClosure,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO specific_closures (id, barber_id, date, closure_type, reason, created_by, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (barber_id, date, closure_type) DO NOTHING",
        )
        .bind(&closure.id)
        .bind(&closure.barber_id)
        .bind(closure.date)
        .bind(&closure.closure_type)
        .bind(&closure.reason)
        .bind(&closure.created_by)
        .bind(closure.created_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_specific_by_date(
        &self,
        barber_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<SpecificClosure>, AppError> {
        sqlx::query_as::<_, SpecificClosure>(
            "SELECT * FROM specific_closures WHERE barber_id = $1 AND date = $2",
        )
        .bind(barber_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_specific_by_range(
        &self,
        barber_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SpecificClosure>, AppError> {
        sqlx::query_as::<_, SpecificClosure>(
            "SELECT * FROM specific_closures WHERE barber_id = $1 AND date >= $2 AND date <= $3 ORDER BY date ASC",
        )
        .bind(barber_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn delete_specific(
        &self,
        barber_id: &str,
        date: NaiveDate,
        closure_type: &str,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "DELETE FROM specific_closures WHERE barber_id = $1 AND date = $2 AND closure_type = $3",
        )
        .bind(barber_id)
        .bind(date)
        .bind(closure_type)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Closure not found".into()));
        }
        Ok(())
    }

    async fn create_recurring(
        &self,
        closure: &RecurringClosure,
    ) -> Result<RecurringClosure, AppError> {
        sqlx::query_as::<_, RecurringClosure>(
            r#"INSERT INTO recurring_closures (id, barber_id, weekday, closure_type, created_at)
               VALUES ($1, $2, $3, $4, $5)
               ON CONFLICT (barber_id, weekday, closure_type) DO UPDATE SET
               closure_type=EXCLUDED.closure_type
               RETURNING *"#,
        )
        .bind(&closure.id)
        .bind(&closure.barber_id)
        .bind(closure.weekday)
        .bind(&closure.closure_type)
        .bind(closure.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_recurring(&self, barber_id: &str) -> Result<Vec<RecurringClosure>, AppError> {
        sqlx::query_as::<_, RecurringClosure>(
            "SELECT * FROM recurring_closures WHERE barber_id = $1 ORDER BY weekday ASC",
        )
        .bind(barber_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn delete_recurring(&self, barber_id: &str, id: &str) -> Result<(), AppError> {
        let result =
            sqlx::query("DELETE FROM recurring_closures WHERE id = $1 AND barber_id = $2")
                .bind(id)
                .bind(barber_id)
                .execute(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Recurring closure not found".into()));
        }
        Ok(())
    }

    async fn record_removed_auto(&self, entry: &RemovedAutoClosure) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO removed_auto_closures (id, barber_id, date, closure_type, removed_by, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (barber_id, date, closure_type) DO NOTHING",
        )
        .bind(&entry.id)
        .bind(&entry.barber_id)
        .bind(entry.date)
        .bind(&entry.closure_type)
        .bind(&entry.removed_by)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(())
    }

    async fn find_removed_auto_by_date(
        &self,
        barber_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<RemovedAutoClosure>, AppError> {
        sqlx::query_as::<_, RemovedAutoClosure>(
            "SELECT * FROM removed_auto_closures WHERE barber_id = $1 AND date = $2",
        )
        .bind(barber_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_removed_auto_by_range(
        &self,
        barber_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RemovedAutoClosure>, AppError> {
        sqlx::query_as::<_, RemovedAutoClosure>(
            "SELECT * FROM removed_auto_closures WHERE barber_id = $1 AND date >= $2 AND date <= $3",
        )
        .bind(barber_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
