use crate::api::dtos::requests::CreateBookingRequest;
use crate::api::handlers::availability::resolve_for_date;
use crate::domain::models::booking::{Booking, NewBookingParams};
use crate::domain::models::waitlist::SlotFreed;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Path(barber_id): Path<String>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let barber = state
        .barber_repo
        .find_by_id(&barber_id)
        .await?
        .ok_or(AppError::NotFound("Barber not found".into()))?;
    if !barber.active {
        return Err(AppError::Validation("Barber is not active".into()));
    }

    let date = NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;
    let time = NaiveTime::parse_from_str(&payload.time, "%H:%M")
        .map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))?;

    let today = state.shop_today();
    if date < today || (date == today && time <= state.shop_now_time()) {
        return Err(AppError::Validation("Cannot book in the past".into()));
    }

    let day = resolve_for_date(&state, &barber, date).await?;

    let Some(slot) = day.slots.iter().find(|s| s.time == payload.time) else {
        return Err(AppError::Validation(
            "Time is not a bookable slot for this barber".into(),
        ));
    };
    if !slot.available {
        return Err(AppError::Conflict("Slot no longer available".into()));
    }

    let booking = Booking::new(NewBookingParams {
        barber_id: barber.id.clone(),
        date,
        time: payload.time,
        customer_name: payload.customer_name,
        customer_phone: payload.customer_phone,
        customer_email: payload.customer_email,
        note: payload.note,
        created_by_user_id: payload.created_by_user_id,
    });

    // The availability check above is advisory; the active-slot unique
    // index decides the race and surfaces as 409.
    let created = state.booking_repo.create(&booking).await?;
    info!(
        "Booking confirmed: {} for barber {} at {} {}",
        created.id, barber.id, created.date, created.time
    );
    Ok(Json(created))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Path(barber_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let barber = state
        .barber_repo
        .find_by_id(&barber_id)
        .await?
        .ok_or(AppError::NotFound("Barber not found".into()))?;

    let date_str = params
        .get("date")
        .ok_or(AppError::Validation("date required".into()))?;
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;

    let bookings = state.booking_repo.list_by_date(&barber.id, date).await?;
    Ok(Json(bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_repo
        .find_by_id(&booking_id)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

/// Staff-side cancellation. The freed slot is the waitlist trigger; a
/// notification failure must not fail the cancel itself.
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let cancelled = state.booking_repo.cancel(&booking_id).await?;
    info!("Booking cancelled: {}", cancelled.id);

    let freed = SlotFreed {
        barber_id: cancelled.barber_id.clone(),
        date: cancelled.date,
        time: cancelled.time.clone(),
    };
    if let Err(e) = state.waitlist_service.on_slot_freed(&freed).await {
        warn!(booking_id = %cancelled.id, error = %e, "waitlist trigger failed after cancel");
    }

    Ok(Json(cancelled))
}
