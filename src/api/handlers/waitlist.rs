use crate::api::dtos::requests::{JoinWaitlistRequest, WaitlistResponseRequest};
use crate::domain::models::waitlist::WaitlistEntry;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

pub async fn join_waitlist(
    State(state): State<Arc<AppState>>,
    Path(barber_id): Path<String>,
    Json(payload): Json<JoinWaitlistRequest>,
) -> Result<impl IntoResponse, AppError> {
    let barber = state
        .barber_repo
        .find_by_id(&barber_id)
        .await?
        .ok_or(AppError::NotFound("Barber not found".into()))?;

    let date = NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;
    if payload.customer_name.trim().is_empty() {
        return Err(AppError::Validation("Customer name is required".into()));
    }

    let entry = WaitlistEntry::new(
        barber.id.clone(),
        date,
        payload.customer_name,
        payload.customer_phone,
    );
    let saved = state.waitlist_repo.enqueue(&entry).await?;
    info!(
        "Waitlist entry {} enqueued for barber {} on {} at position {}",
        saved.id, barber.id, date, saved.position
    );
    Ok(Json(saved))
}

pub async fn list_waitlist(
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

    let entries = state.waitlist_repo.list_by_date(&barber.id, date).await?;
    Ok(Json(entries))
}

/// Customer response to an offer/notification. ACCEPT books the freed slot
/// through the regular conflict guard; DECLINE advances the queue in
/// single-offer mode.
pub async fn respond_waitlist(
    State(state): State<Arc<AppState>>,
    Path(entry_id): Path<String>,
    Json(payload): Json<WaitlistResponseRequest>,
) -> Result<impl IntoResponse, AppError> {
    let entry = state
        .waitlist_repo
        .find_by_id(&entry_id)
        .await?
        .ok_or(AppError::NotFound("Waitlist entry not found".into()))?;

    match payload.action.to_ascii_uppercase().as_str() {
        "ACCEPT" => {
            let booking = state.waitlist_service.accept(&entry).await?;
            Ok(Json(serde_json::json!({
                "status": "approved",
                "booking": booking
            })))
        }
        "DECLINE" => {
            state.waitlist_service.decline(&entry).await?;
            Ok(Json(serde_json::json!({"status": "declined"})))
        }
        other => Err(AppError::Validation(format!("Unknown action: {}", other))),
    }
}
