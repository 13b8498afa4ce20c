use crate::domain::{models::barber::Barber, ports::BarberRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresBarberRepo {
    pool: PgPool,
}

impl PostgresBarberRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BarberRepository for PostgresBarberRepo {
    async fn create(&self, barber: &Barber) -> Result<Barber, AppError> {
        sqlx::query_as::<_, Barber>(
            "INSERT INTO barbers (id, name, email, active, pattern_json, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(&barber.id)
        .bind(&barber.name)
        .bind(&barber.email)
        .bind(barber.active)
        .bind(&barber.pattern_json)
        .bind(barber.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Barber>, AppError> {
        sqlx::query_as::<_, Barber>("SELECT * FROM barbers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Barber>, AppError> {
        sqlx::query_as::<_, Barber>("SELECT * FROM barbers ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_active(&self) -> Result<Vec<Barber>, AppError> {
        sqlx::query_as::<_, Barber>(
            "SELECT * FROM barbers WHERE active = TRUE ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update(&self, barber: &Barber) -> Result<Barber, AppError> {
        sqlx::query_as::<_, Barber>(
            "UPDATE barbers SET name = $1, email = $2, active = $3, pattern_json = $4
             WHERE id = $5
             RETURNING *",
        )
        .bind(&barber.name)
        .bind(&barber.email)
        .bind(barber.active)
        .bind(&barber.pattern_json)
        .bind(&barber.id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
