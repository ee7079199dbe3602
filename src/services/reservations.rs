//! Reservations service: whole-lab blocks and class planning

use validator::Validate;

use super::{
    availability::{check_availability, Availability, DateRange, Target},
    equipment::unique_ids,
};
use crate::{
    error::{AppError, AppResult},
    models::{
        reservation::{AvailabilityQuery, AvailabilityResponse, PlanDevicesRequest, ReserveLabRequest},
        sheet::{WHOLE_LAB_ID, WHOLE_LAB_NAME},
        BatchReport, ItemOutcome, Outcome, Reservation,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
}

impl ReservationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Reservation>> {
        Ok(self.repository.snapshot().await?.reservations.clone())
    }

    pub async fn availability(&self, query: &AvailabilityQuery) -> AppResult<AvailabilityResponse> {
        let range = DateRange::new(query.start_date, query.end_date)?;
        let snapshot = self.repository.snapshot().await?;

        Ok(
            match check_availability(Target::from_id(&query.equipment_id), range, &snapshot.reservations) {
                Availability::Available => AvailabilityResponse {
                    available: true,
                    conflict: None,
                },
                Availability::Conflict(reason) => AvailabilityResponse {
                    available: false,
                    conflict: Some(reason),
                },
            },
        )
    }

    /// Block the entire lab; refused when another whole-lab block overlaps
    pub async fn reserve_lab(&self, request: &ReserveLabRequest) -> AppResult<Reservation> {
        request.validate()?;
        let range = DateRange::new(request.start_date, request.end_date)?;
        let snapshot = self.repository.snapshot().await?;

        if let Availability::Conflict(reason) =
            check_availability(Target::WholeLab, range, &snapshot.reservations)
        {
            return Err(AppError::Conflict(reason));
        }

        let reservation = Reservation {
            equipment_id: WHOLE_LAB_ID.to_string(),
            equipment_name: WHOLE_LAB_NAME.to_string(),
            requester: request.requester.trim().to_string(),
            start_date: Some(range.start),
            end_date: Some(range.end),
            purpose: request.purpose.label().to_string(),
            row_number: 0,
        };

        let written = self.repository.reservations_append(&reservation).await;
        self.repository.invalidate().await;
        written?;

        tracing::info!(
            "Lab blocked {} to {} by {}",
            range.start,
            range.end,
            reservation.requester
        );
        Ok(reservation)
    }

    /// Book each selected device that is free over the range
    pub async fn plan(&self, request: &PlanDevicesRequest) -> AppResult<BatchReport> {
        request.validate()?;
        let range = DateRange::new(request.start_date, request.end_date)?;
        let snapshot = self.repository.snapshot().await?;
        let ids = unique_ids(&request.equipment_ids);
        let mut report = BatchReport::default();

        for (idx, id) in ids.iter().enumerate() {
            let Some(equipment) = snapshot.equipment_by_id(id) else {
                report.push(ItemOutcome::with(id, Outcome::Rejected, Some(format!("Unknown equipment {}", id))));
                continue;
            };
            if let Availability::Conflict(reason) =
                check_availability(Target::Device(id), range, &snapshot.reservations)
            {
                report.push(ItemOutcome::with(id, Outcome::Conflict, Some(reason)));
                continue;
            }

            let reservation = Reservation {
                equipment_id: equipment.id.clone(),
                equipment_name: equipment.name.clone(),
                requester: request.requester.trim().to_string(),
                start_date: Some(range.start),
                end_date: Some(range.end),
                purpose: request.purpose.label().to_string(),
                row_number: 0,
            };

            match self.repository.reservations_append(&reservation).await {
                Ok(()) => report.push(ItemOutcome::done(id)),
                Err(e) => {
                    tracing::error!("Reservation of {} failed: {}", id, e);
                    report.push(ItemOutcome::with(id, Outcome::Failed, Some(e.to_string())));
                    report.skip_rest(&ids[idx + 1..]);
                    break;
                }
            }
        }

        if report.touched_store() {
            self.repository.invalidate().await;
        }
        Ok(report)
    }
}
