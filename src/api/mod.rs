//! API handlers for Labtrack REST endpoints

pub mod calendar;
pub mod equipment;
pub mod faults;
pub mod health;
pub mod openapi;
pub mod proposals;
pub mod remarks;
pub mod reservations;

use axum::{
    routing::{get, post, put},
    Router,
};
use chrono::{Local, NaiveDate};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Local calendar day used for defaults and stamps
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Calendar
        .route("/calendar", get(calendar::get_calendar))
        .route("/refresh", post(calendar::refresh))
        // Equipment
        .route("/equipment", get(equipment::status_board))
        .route("/equipment/checkout", post(equipment::checkout))
        .route("/equipment/return", post(equipment::return_equipment))
        // Reservations
        .route("/reservations", get(reservations::list_reservations))
        .route("/availability", get(reservations::check_availability))
        .route("/reservations/lab", post(reservations::reserve_lab))
        .route("/reservations/plan", post(reservations::plan_devices))
        // Faults
        .route("/faults", get(faults::list_faults).post(faults::report_fault))
        // Proposals
        .route(
            "/proposals",
            get(proposals::list_proposals).post(proposals::create_proposal),
        )
        .route("/proposals/:id/status", put(proposals::update_proposal_status))
        // Remarks
        .route("/remarks", get(remarks::list_remarks).post(remarks::create_remark))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
