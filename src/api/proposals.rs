//! Purchase proposal endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        proposal::{CreateProposal, UpdateProposalStatus},
        Proposal,
    },
};

/// List purchase proposals
#[utoipa::path(
    get,
    path = "/proposals",
    tag = "proposals",
    responses(
        (status = 200, description = "Proposals list", body = Vec<Proposal>)
    )
)]
pub async fn list_proposals(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Proposal>>> {
    let proposals = state.services.proposals.list().await?;
    Ok(Json(proposals))
}

/// Submit a purchase proposal
#[utoipa::path(
    post,
    path = "/proposals",
    tag = "proposals",
    request_body = CreateProposal,
    responses(
        (status = 201, description = "Proposal submitted", body = Proposal),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_proposal(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateProposal>,
) -> AppResult<(StatusCode, Json<Proposal>)> {
    let proposal = state.services.proposals.submit(&request, super::today()).await?;
    Ok((StatusCode::CREATED, Json(proposal)))
}

/// Record the manager's decision
#[utoipa::path(
    put,
    path = "/proposals/{id}/status",
    tag = "proposals",
    params(("id" = String, Path, description = "Proposal ID")),
    request_body = UpdateProposalStatus,
    responses(
        (status = 204, description = "Status updated"),
        (status = 404, description = "Proposal not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_proposal_status(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateProposalStatus>,
) -> AppResult<StatusCode> {
    state.services.proposals.update_status(&id, &request).await?;
    Ok(StatusCode::NO_CONTENT)
}
