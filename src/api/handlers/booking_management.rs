use crate::domain::models::waitlist::SlotFreed;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Customer-facing lookup via the management token issued at booking time.
pub async fn get_booking_by_token(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_repo
        .find_by_token(&token)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

pub async fn cancel_booking_by_token(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_repo
        .find_by_token(&token)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    let cancelled = state.booking_repo.cancel(&booking.id).await?;
    info!("Booking cancelled via token: {}", cancelled.id);

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
