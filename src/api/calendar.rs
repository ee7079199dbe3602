//! Calendar and refresh endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{error::AppResult, models::CalendarEvent};

/// All reservations and active loans as all-day calendar entries
#[utoipa::path(
    get,
    path = "/calendar",
    tag = "calendar",
    responses(
        (status = 200, description = "Calendar entries", body = Vec<CalendarEvent>)
    )
)]
pub async fn get_calendar(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<CalendarEvent>>> {
    let events = state.services.calendar.events(super::today()).await?;
    Ok(Json(events))
}

/// Drop the memoized workbook snapshot
#[utoipa::path(
    post,
    path = "/refresh",
    tag = "calendar",
    responses(
        (status = 204, description = "Snapshot discarded; next read hits the store")
    )
)]
pub async fn refresh(State(state): State<crate::AppState>) -> StatusCode {
    state.services.repository.invalidate().await;
    tracing::debug!("Workbook snapshot invalidated on request");
    StatusCode::NO_CONTENT
}
