//! Equipment API endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{
        equipment::{CheckoutRequest, ReturnRequest, StatusBoard},
        BatchReport,
    },
};

/// Equipment table with today's lab notice
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    responses(
        (status = 200, description = "Equipment status board", body = StatusBoard)
    )
)]
pub async fn status_board(State(state): State<crate::AppState>) -> AppResult<Json<StatusBoard>> {
    let board = state.services.equipment.status_board(super::today()).await?;
    Ok(Json(board))
}

/// Check out devices to a holder
#[utoipa::path(
    post,
    path = "/equipment/checkout",
    tag = "equipment",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Per-device outcome", body = BatchReport),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse)
    )
)]
pub async fn checkout(
    State(state): State<crate::AppState>,
    Json(request): Json<CheckoutRequest>,
) -> AppResult<Json<BatchReport>> {
    let report = state.services.equipment.checkout(&request, super::today()).await?;
    Ok(Json(report))
}

/// Return devices
#[utoipa::path(
    post,
    path = "/equipment/return",
    tag = "equipment",
    request_body = ReturnRequest,
    responses(
        (status = 200, description = "Per-device outcome", body = BatchReport),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_equipment(
    State(state): State<crate::AppState>,
    Json(request): Json<ReturnRequest>,
) -> AppResult<Json<BatchReport>> {
    let report = state.services.equipment.return_items(&request).await?;
    Ok(Json(report))
}
