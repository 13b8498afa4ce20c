use crate::api::dtos::responses::{AvailabilityResponse, RangeAvailabilityResponse};
use crate::domain::models::barber::Barber;
use crate::domain::services::availability::{day_availability, DayAvailability};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;

fn parse_date(raw: &str, field: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid {} (expected YYYY-MM-DD)", field)))
}

async fn load_barber(state: &AppState, barber_id: &str) -> Result<Barber, AppError> {
    state
        .barber_repo
        .find_by_id(barber_id)
        .await?
        .ok_or(AppError::NotFound("Barber not found".into()))
}

/// Loads everything one date needs and delegates to the pure resolver. The
/// range endpoint bulk-loads instead but evaluates each date with the same
/// core, so the two paths agree by construction.
pub async fn resolve_for_date(
    state: &AppState,
    barber: &Barber,
    date: NaiveDate,
) -> Result<DayAvailability, AppError> {
    let schedule = state.schedule_repo.find_by_date(&barber.id, date).await?;
    let specific = state.closure_repo.find_specific_by_date(&barber.id, date).await?;
    let recurring = state.closure_repo.list_recurring(&barber.id).await?;
    let removed = state
        .closure_repo
        .find_removed_auto_by_date(&barber.id, date)
        .await?;
    let bookings = state.booking_repo.list_active_by_date(&barber.id, date).await?;

    Ok(day_availability(
        barber,
        date,
        schedule.as_ref(),
        &specific,
        &recurring,
        &removed,
        &bookings,
    ))
}

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Path(barber_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let date_str = params
        .get("date")
        .ok_or(AppError::Validation("date required".into()))?;
    let date = parse_date(date_str, "date")?;

    let barber = load_barber(&state, &barber_id).await?;
    let day = resolve_for_date(&state, &barber, date).await?;

    Ok(Json(AvailabilityResponse {
        date: date_str.to_string(),
        available_count: day.available_count,
        slots: day.slots,
    }))
}

pub async fn get_availability_range(
    State(state): State<Arc<AppState>>,
    Path(barber_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let start_str = params
        .get("start")
        .ok_or(AppError::Validation("start required".into()))?;
    let end_str = params
        .get("end")
        .ok_or(AppError::Validation("end required".into()))?;

    let start = parse_date(start_str, "start")?;
    let end = parse_date(end_str, "end")?;
    if end < start {
        return Err(AppError::Validation("end must not precede start".into()));
    }

    let barber = load_barber(&state, &barber_id).await?;

    let schedules = state.schedule_repo.list_by_range(&barber.id, start, end).await?;
    let specifics = state
        .closure_repo
        .list_specific_by_range(&barber.id, start, end)
        .await?;
    let removed = state
        .closure_repo
        .list_removed_auto_by_range(&barber.id, start, end)
        .await?;
    let recurring = state.closure_repo.list_recurring(&barber.id).await?;
    let bookings = state
        .booking_repo
        .list_active_by_range(&barber.id, start, end)
        .await?;

    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        let schedule = schedules.iter().find(|s| s.date == current);
        let day_specific: Vec<_> = specifics
            .iter()
            .filter(|c| c.date == current)
            .cloned()
            .collect();
        let day_removed: Vec<_> = removed
            .iter()
            .filter(|r| r.date == current)
            .cloned()
            .collect();
        let day_bookings: Vec<_> = bookings
            .iter()
            .filter(|b| b.date == current)
            .cloned()
            .collect();

        days.push(day_availability(
            &barber,
            current,
            schedule,
            &day_specific,
            &recurring,
            &day_removed,
            &day_bookings,
        ));
        current += Duration::days(1);
    }

    Ok(Json(RangeAvailabilityResponse { days }))
}
