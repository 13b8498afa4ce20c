use crate::api::dtos::requests::{CreateClosureRequest, CreateRecurringClosureRequest};
use crate::domain::models::closure::{
    ClosureType, RecurringClosure, RemovedAutoClosure, SpecificClosure,
};
use crate::domain::models::schedule::ScheduleDay;
use crate::domain::services::slots::base_slots;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

fn parse_closure_type(raw: &str) -> Result<ClosureType, AppError> {
    raw.parse()
        .map_err(|_| AppError::Validation(format!("Invalid closure type: {}", raw)))
}

pub async fn create_closure(
    State(state): State<Arc<AppState>>,
    Path(barber_id): Path<String>,
    Json(payload): Json<CreateClosureRequest>,
) -> Result<impl IntoResponse, AppError> {
    let barber = state
        .barber_repo
        .find_by_id(&barber_id)
        .await?
        .ok_or(AppError::NotFound("Barber not found".into()))?;

    let date = NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;
    let closure_type = parse_closure_type(&payload.closure_type)?;

    let closure = SpecificClosure::new(
        barber.id.clone(),
        date,
        closure_type,
        payload.reason,
        payload.created_by.unwrap_or_else(|| "admin".to_string()),
    );
    let saved = state.closure_repo.upsert_specific(&closure).await?;
    info!("Closure created for barber {} on {}: {}", barber.id, date, closure_type);
    Ok(Json(saved))
}

pub async fn list_closures(
    State(state): State<Arc<AppState>>,
    Path(barber_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let barber = state
        .barber_repo
        .find_by_id(&barber_id)
        .await?
        .ok_or(AppError::NotFound("Barber not found".into()))?;

    let start_str = params
        .get("start")
        .ok_or(AppError::Validation("start required".into()))?;
    let end_str = params
        .get("end")
        .ok_or(AppError::Validation("end required".into()))?;
    let start = NaiveDate::parse_from_str(start_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid start".into()))?;
    let end = NaiveDate::parse_from_str(end_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid end".into()))?;

    let closures = state
        .closure_repo
        .list_specific_by_range(&barber.id, start, end)
        .await?;
    Ok(Json(closures))
}

/// Removing a system-auto closure is the "exceptional opening" operation:
/// the ledger entry and the schedule-day exception flag are written before
/// the closure row goes away, so the next materializer run leaves the date
/// open. Barber/admin closures are plain deletes.
pub async fn delete_closure(
    State(state): State<Arc<AppState>>,
    Path((barber_id, date_str, type_str)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let barber = state
        .barber_repo
        .find_by_id(&barber_id)
        .await?
        .ok_or(AppError::NotFound("Barber not found".into()))?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date".into()))?;
    let closure_type = parse_closure_type(&type_str)?;

    let existing = state
        .closure_repo
        .find_specific_by_date(&barber.id, date)
        .await?;
    let closure = existing
        .iter()
        .find(|c| c.kind() == closure_type)
        .ok_or(AppError::NotFound("Closure not found".into()))?;

    if closure.is_auto() {
        let ledger = RemovedAutoClosure::new(barber.id.clone(), date, closure_type, None);
        state.closure_repo.record_removed_auto(&ledger).await?;

        let slots = base_slots(&barber.pattern(), date.weekday());
        let day = ScheduleDay::new(barber.id.clone(), date, &slots);
        state.schedule_repo.insert_if_absent(&day).await?;
        state.schedule_repo.mark_exception(&barber.id, date).await?;
        info!(
            "Auto closure removed for barber {} on {} ({}); exceptional opening recorded",
            barber.id, date, closure_type
        );
    }

    state
        .closure_repo
        .delete_specific(&barber.id, date, closure_type.as_str())
        .await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn create_recurring_closure(
    State(state): State<Arc<AppState>>,
    Path(barber_id): Path<String>,
    Json(payload): Json<CreateRecurringClosureRequest>,
) -> Result<impl IntoResponse, AppError> {
    let barber = state
        .barber_repo
        .find_by_id(&barber_id)
        .await?
        .ok_or(AppError::NotFound("Barber not found".into()))?;

    if !(0..=6).contains(&payload.weekday) {
        return Err(AppError::Validation("weekday must be 0-6".into()));
    }
    let closure_type = parse_closure_type(&payload.closure_type)?;

    let rule = RecurringClosure::new(barber.id.clone(), payload.weekday, closure_type);
    let saved = state.closure_repo.create_recurring(&rule).await?;
    info!(
        "Recurring closure created for barber {}: weekday {} {}",
        barber.id, payload.weekday, closure_type
    );
    Ok(Json(saved))
}

pub async fn list_recurring_closures(
    State(state): State<Arc<AppState>>,
    Path(barber_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let barber = state
        .barber_repo
        .find_by_id(&barber_id)
        .await?
        .ok_or(AppError::NotFound("Barber not found".into()))?;

    let rules = state.closure_repo.list_recurring(&barber.id).await?;
    Ok(Json(rules))
}

pub async fn delete_recurring_closure(
    State(state): State<Arc<AppState>>,
    Path((barber_id, rule_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state
        .closure_repo
        .delete_recurring(&barber_id, &rule_id)
        .await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
