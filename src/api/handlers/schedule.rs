use crate::api::dtos::requests::UpdateScheduleDayRequest;
use crate::domain::models::schedule::ScheduleDay;
use crate::domain::services::slots::base_slots;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, NaiveDate, NaiveTime};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Manual per-day edit: block/unblock individual slots or toggle a day off.
/// The row is laid down first when the materializer has not reached the
/// date yet.
pub async fn update_schedule_day(
    State(state): State<Arc<AppState>>,
    Path((barber_id, date_str)): Path<(String, String)>,
    Json(payload): Json<UpdateScheduleDayRequest>,
) -> Result<impl IntoResponse, AppError> {
    let barber = state
        .barber_repo
        .find_by_id(&barber_id)
        .await?
        .ok_or(AppError::NotFound("Barber not found".into()))?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;

    if let Some(slots) = &payload.unavailable_slots {
        for label in slots {
            if NaiveTime::parse_from_str(label, "%H:%M").is_err() {
                return Err(AppError::Validation(format!("Invalid slot label: {}", label)));
            }
        }
    }

    let slots = base_slots(&barber.pattern(), date.weekday());
    let day = ScheduleDay::new(barber.id.clone(), date, &slots);
    state.schedule_repo.insert_if_absent(&day).await?;

    let unavailable_json = match &payload.unavailable_slots {
        Some(slots) => Some(
            serde_json::to_string(slots)
                .map_err(|_| AppError::Validation("Invalid slot list".into()))?,
        ),
        None => None,
    };

    let updated = state
        .schedule_repo
        .update_manual_state(&barber.id, date, unavailable_json.as_deref(), payload.day_off)
        .await?;
    info!("Schedule day updated for barber {} on {}", barber.id, date);
    Ok(Json(updated))
}

/// Manual trigger for the daily materializer run; same code path as the
/// scheduled one, safe to invoke for catch-up at any time.
pub async fn materialize(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let window_days = match params.get("days") {
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| AppError::Validation("days must be a number".into()))?,
        None => state.config.materialize_window_days,
    };
    if !(1..=365).contains(&window_days) {
        return Err(AppError::Validation("days must be between 1 and 365".into()));
    }

    let summary = state
        .materializer
        .run(state.shop_today(), window_days)
        .await?;
    Ok(Json(summary))
}
