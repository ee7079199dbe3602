//! Equipment service: status board, checkout and return

use chrono::NaiveDate;
use validator::Validate;

use super::availability::{check_availability, Availability, DateRange, Target};
use crate::{
    error::AppResult,
    models::{
        equipment::{CheckoutRequest, ReturnRequest, StatusBoard},
        sheet::normalize_id,
        BatchReport, ItemOutcome, Outcome,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Equipment table plus a notice when the whole lab is blocked today
    pub async fn status_board(&self, today: NaiveDate) -> AppResult<StatusBoard> {
        let snapshot = self.repository.snapshot().await?;
        let lab_blocked_today = match check_availability(
            Target::WholeLab,
            DateRange::single_day(today),
            &snapshot.reservations,
        ) {
            Availability::Available => None,
            Availability::Conflict(reason) => Some(reason),
        };

        Ok(StatusBoard {
            lab_blocked_today,
            equipment: snapshot.equipment.clone(),
        })
    }

    /// Check out each selected device that is Available and not booked
    /// over the loan period. Stops at the first store failure.
    pub async fn checkout(&self, request: &CheckoutRequest, today: NaiveDate) -> AppResult<BatchReport> {
        request.validate()?;
        let checkout_date = request.checkout_date.unwrap_or(today);
        let range = DateRange::new(checkout_date, request.due_date)?;
        let holder = request.holder.trim();

        let snapshot = self.repository.snapshot().await?;
        let ids = unique_ids(&request.equipment_ids);
        let mut report = BatchReport::default();

        for (idx, id) in ids.iter().enumerate() {
            let Some(equipment) = snapshot.equipment_by_id(id) else {
                report.push(ItemOutcome::with(id, Outcome::Rejected, Some(format!("Unknown equipment {}", id))));
                continue;
            };
            if !equipment.is_available() {
                let status = equipment
                    .status
                    .map(|s| s.label().to_string())
                    .unwrap_or_else(|| "of unknown status".to_string());
                report.push(ItemOutcome::with(
                    id,
                    Outcome::Rejected,
                    Some(format!("{} is {}", equipment.name, status)),
                ));
                continue;
            }
            if let Availability::Conflict(reason) =
                check_availability(Target::Device(id), range, &snapshot.reservations)
            {
                report.push(ItemOutcome::with(id, Outcome::Conflict, Some(reason)));
                continue;
            }

            match self
                .repository
                .equipment_mark_checked_out(id, holder, checkout_date, request.due_date)
                .await
            {
                Ok(()) => {
                    tracing::info!("Checked out {} to {} until {}", id, holder, request.due_date);
                    report.push(ItemOutcome::done(id));
                }
                Err(e) => {
                    tracing::error!("Checkout of {} failed: {}", id, e);
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

    /// Return each selected device that is currently checked out
    pub async fn return_items(&self, request: &ReturnRequest) -> AppResult<BatchReport> {
        request.validate()?;
        let snapshot = self.repository.snapshot().await?;
        let ids = unique_ids(&request.equipment_ids);
        let mut report = BatchReport::default();

        for (idx, id) in ids.iter().enumerate() {
            match snapshot.equipment_by_id(id) {
                None => {
                    report.push(ItemOutcome::with(id, Outcome::Rejected, Some(format!("Unknown equipment {}", id))));
                    continue;
                }
                Some(equipment) if !equipment.is_checked_out() => {
                    report.push(ItemOutcome::with(
                        id,
                        Outcome::Rejected,
                        Some(format!("{} is not checked out", equipment.name)),
                    ));
                    continue;
                }
                Some(_) => {}
            }

            match self.repository.equipment_mark_returned(id).await {
                Ok(()) => {
                    tracing::info!("Returned {}", id);
                    report.push(ItemOutcome::done(id));
                }
                Err(e) => {
                    tracing::error!("Return of {} failed: {}", id, e);
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

/// Normalized ids in submission order, duplicates dropped
pub(crate) fn unique_ids(raw: &[String]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::with_capacity(raw.len());
    for id in raw.iter().map(|id| normalize_id(id)) {
        if !id.is_empty() && !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}
