//! Reservation API endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        reservation::{
            AvailabilityQuery, AvailabilityResponse, PlanDevicesRequest, ReserveLabRequest,
        },
        BatchReport, Reservation,
    },
};

/// List all reservations
#[utoipa::path(
    get,
    path = "/reservations",
    tag = "reservations",
    responses(
        (status = 200, description = "Reservations list", body = Vec<Reservation>)
    )
)]
pub async fn list_reservations(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.services.reservations.list().await?;
    Ok(Json(reservations))
}

/// Check whether a device, or the whole lab, is free over a range
#[utoipa::path(
    get,
    path = "/availability",
    tag = "reservations",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Availability", body = AvailabilityResponse),
        (status = 400, description = "Start after end", body = crate::error::ErrorResponse)
    )
)]
pub async fn check_availability(
    State(state): State<crate::AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let answer = state.services.reservations.availability(&query).await?;
    Ok(Json(answer))
}

/// Block the entire lab
#[utoipa::path(
    post,
    path = "/reservations/lab",
    tag = "reservations",
    request_body = ReserveLabRequest,
    responses(
        (status = 201, description = "Lab blocked", body = Reservation),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 409, description = "Overlaps another lab block", body = crate::error::ErrorResponse)
    )
)]
pub async fn reserve_lab(
    State(state): State<crate::AppState>,
    Json(request): Json<ReserveLabRequest>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let reservation = state.services.reservations.reserve_lab(&request).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Reserve several devices for a class or project
#[utoipa::path(
    post,
    path = "/reservations/plan",
    tag = "reservations",
    request_body = PlanDevicesRequest,
    responses(
        (status = 200, description = "Per-device outcome", body = BatchReport),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse)
    )
)]
pub async fn plan_devices(
    State(state): State<crate::AppState>,
    Json(request): Json<PlanDevicesRequest>,
) -> AppResult<Json<BatchReport>> {
    let report = state.services.reservations.plan(&request).await?;
    Ok(Json(report))
}
