use crate::api::dtos::requests::{CreateBarberRequest, UpdateBarberRequest};
use crate::domain::models::barber::{Barber, WeekPattern};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

pub async fn create_barber(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBarberRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".into()));
    }

    let pattern = match (&payload.pattern, &payload.pattern_preset) {
        (Some(pattern), None) => pattern.clone(),
        (None, Some(preset)) => WeekPattern::preset(preset)
            .ok_or_else(|| AppError::Validation(format!("Unknown pattern preset: {}", preset)))?,
        (None, None) => WeekPattern::standard(),
        (Some(_), Some(_)) => {
            return Err(AppError::Validation(
                "Provide either pattern or pattern_preset, not both".into(),
            ));
        }
    };

    let barber = Barber::new(payload.name, payload.email, &pattern);
    let created = state.barber_repo.create(&barber).await?;
    info!("Barber created: {} ({})", created.name, created.id);
    Ok(Json(created))
}

pub async fn list_barbers(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let barbers = state.barber_repo.list().await?;
    Ok(Json(barbers))
}

pub async fn get_barber(
    State(state): State<Arc<AppState>>,
    Path(barber_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let barber = state
        .barber_repo
        .find_by_id(&barber_id)
        .await?
        .ok_or(AppError::NotFound("Barber not found".into()))?;
    Ok(Json(barber))
}

pub async fn update_barber(
    State(state): State<Arc<AppState>>,
    Path(barber_id): Path<String>,
    Json(payload): Json<UpdateBarberRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut barber = state
        .barber_repo
        .find_by_id(&barber_id)
        .await?
        .ok_or(AppError::NotFound("Barber not found".into()))?;

    if let Some(val) = payload.name {
        barber.name = val;
    }
    if let Some(val) = payload.email {
        barber.email = val;
    }
    if let Some(val) = payload.active {
        barber.active = val;
    }
    if let Some(val) = payload.pattern {
        barber.pattern_json = serde_json::to_string(&val)
            .map_err(|_| AppError::Validation("Invalid pattern".into()))?;
    }

    let updated = state.barber_repo.update(&barber).await?;
    info!("Barber updated: {}", updated.id);
    Ok(Json(updated))
}
