use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;

use crate::api::handlers::{
    availability, barber, booking, booking_management, closure, health, schedule, waitlist,
};
use crate::state::AppState;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Barbers
        .route("/api/v1/barbers", post(barber::create_barber).get(barber::list_barbers))
        .route("/api/v1/barbers/{barber_id}", get(barber::get_barber).put(barber::update_barber))

        // Availability (public read path)
        .route("/api/v1/barbers/{barber_id}/availability", get(availability::get_availability))
        .route("/api/v1/barbers/{barber_id}/availability/range", get(availability::get_availability_range))

        // Closures
        .route("/api/v1/barbers/{barber_id}/closures", get(closure::list_closures).post(closure::create_closure))
        .route("/api/v1/barbers/{barber_id}/closures/{date}/{closure_type}", delete(closure::delete_closure))
        .route("/api/v1/barbers/{barber_id}/recurring-closures", get(closure::list_recurring_closures).post(closure::create_recurring_closure))
        .route("/api/v1/barbers/{barber_id}/recurring-closures/{rule_id}", delete(closure::delete_recurring_closure))

        // Schedule days & materializer
        .route("/api/v1/barbers/{barber_id}/schedule/{date}", put(schedule::update_schedule_day))
        .route("/api/v1/admin/materialize", post(schedule::materialize))

        // Bookings
        .route("/api/v1/barbers/{barber_id}/bookings", post(booking::create_booking).get(booking::list_bookings))
        .route("/api/v1/bookings/{booking_id}", get(booking::get_booking))
        .route("/api/v1/bookings/{booking_id}/cancel", post(booking::cancel_booking))

        // Customer booking management
        .route("/api/v1/bookings/manage/{token}", get(booking_management::get_booking_by_token))
        .route("/api/v1/bookings/manage/{token}/cancel", post(booking_management::cancel_booking_by_token))

        // Waitlist
        .route("/api/v1/barbers/{barber_id}/waitlist", get(waitlist::list_waitlist).post(waitlist::join_waitlist))
        .route("/api/v1/waitlist/{entry_id}/respond", post(waitlist::respond_waitlist))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        barber_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
