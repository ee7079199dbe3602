//! Fault report endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::{fault::CreateFaultReport, FaultReport},
};

/// List fault reports
#[utoipa::path(
    get,
    path = "/faults",
    tag = "faults",
    responses(
        (status = 200, description = "Fault reports", body = Vec<FaultReport>)
    )
)]
pub async fn list_faults(State(state): State<crate::AppState>) -> AppResult<Json<Vec<FaultReport>>> {
    let faults = state.services.faults.list().await?;
    Ok(Json(faults))
}

/// Report a fault and put the device in repair
#[utoipa::path(
    post,
    path = "/faults",
    tag = "faults",
    request_body = CreateFaultReport,
    responses(
        (status = 201, description = "Fault recorded", body = FaultReport),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown equipment", body = crate::error::ErrorResponse)
    )
)]
pub async fn report_fault(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateFaultReport>,
) -> AppResult<(StatusCode, Json<FaultReport>)> {
    let report = state.services.faults.report(&request, super::today()).await?;
    Ok((StatusCode::CREATED, Json(report)))
}
