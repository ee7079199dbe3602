//! Remark box endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::{remark::CreateRemark, Remark},
};

/// List remarks
#[utoipa::path(
    get,
    path = "/remarks",
    tag = "remarks",
    responses(
        (status = 200, description = "Remarks", body = Vec<Remark>)
    )
)]
pub async fn list_remarks(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Remark>>> {
    let remarks = state.services.remarks.list().await?;
    Ok(Json(remarks))
}

/// Leave a remark
#[utoipa::path(
    post,
    path = "/remarks",
    tag = "remarks",
    request_body = CreateRemark,
    responses(
        (status = 201, description = "Remark saved", body = Remark),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_remark(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateRemark>,
) -> AppResult<(StatusCode, Json<Remark>)> {
    let remark = state.services.remarks.submit(&request, super::today()).await?;
    Ok((StatusCode::CREATED, Json(remark)))
}
