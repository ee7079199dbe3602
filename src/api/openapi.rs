//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{calendar, equipment, faults, health, proposals, remarks, reservations};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Labtrack API",
        version = "0.3.0",
        description = "Laboratory equipment, reservations and requests over a shared workbook",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Calendar
        calendar::get_calendar,
        calendar::refresh,
        // Equipment
        equipment::status_board,
        equipment::checkout,
        equipment::return_equipment,
        // Reservations
        reservations::list_reservations,
        reservations::check_availability,
        reservations::reserve_lab,
        reservations::plan_devices,
        // Faults
        faults::list_faults,
        faults::report_fault,
        // Proposals
        proposals::list_proposals,
        proposals::create_proposal,
        proposals::update_proposal_status,
        // Remarks
        remarks::list_remarks,
        remarks::create_remark,
    ),
    components(
        schemas(
            // Equipment
            crate::models::Equipment,
            crate::models::EquipmentStatus,
            crate::models::equipment::StatusBoard,
            crate::models::equipment::CheckoutRequest,
            crate::models::equipment::ReturnRequest,
            // Batches
            crate::models::BatchReport,
            crate::models::ItemOutcome,
            crate::models::Outcome,
            // Reservations
            crate::models::Reservation,
            crate::models::ReservationPurpose,
            crate::models::reservation::ReserveLabRequest,
            crate::models::reservation::PlanDevicesRequest,
            crate::models::reservation::AvailabilityResponse,
            // Calendar
            crate::models::CalendarEvent,
            crate::models::event::CalendarEventKind,
            // Faults
            crate::models::FaultReport,
            crate::models::fault::CreateFaultReport,
            // Proposals
            crate::models::Proposal,
            crate::models::ProposalStatus,
            crate::models::proposal::CreateProposal,
            crate::models::proposal::UpdateProposalStatus,
            // Remarks
            crate::models::Remark,
            crate::models::RemarkCategory,
            crate::models::remark::CreateRemark,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "calendar", description = "Combined calendar and cache refresh"),
        (name = "equipment", description = "Status board, checkout and return"),
        (name = "reservations", description = "Lab blocks, class planning and availability"),
        (name = "faults", description = "Fault reports"),
        (name = "proposals", description = "Purchase proposals"),
        (name = "remarks", description = "Remark box")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_write_actions() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/equipment/checkout",
            "/equipment/return",
            "/reservations/lab",
            "/reservations/plan",
            "/proposals/{id}/status",
            "/refresh",
        ] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
    }
}
