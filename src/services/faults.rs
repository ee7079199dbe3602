//! Fault reporting service

use chrono::NaiveDate;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{EquipmentStatus, FAULT_STATUS_OPEN},
        fault::CreateFaultReport,
        sheet::normalize_id,
        FaultReport,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct FaultsService {
    repository: Repository,
}

impl FaultsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<FaultReport>> {
        Ok(self.repository.snapshot().await?.faults.clone())
    }

    /// Append the report, then flag the device as In repair
    pub async fn report(&self, request: &CreateFaultReport, today: NaiveDate) -> AppResult<FaultReport> {
        request.validate()?;
        let id = normalize_id(&request.equipment_id);
        let snapshot = self.repository.snapshot().await?;
        let equipment = snapshot
            .equipment_by_id(&id)
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;

        let report = FaultReport {
            equipment_id: equipment.id.clone(),
            equipment_name: equipment.name.clone(),
            reporter: request.reporter.trim().to_string(),
            description: request.description.trim().to_string(),
            reported_on: Some(today),
            status: FAULT_STATUS_OPEN.to_string(),
        };

        let written = self.write(&report).await;
        self.repository.invalidate().await;
        written?;

        tracing::info!("Fault reported on {} by {}", report.equipment_id, report.reporter);
        Ok(report)
    }

    async fn write(&self, report: &FaultReport) -> AppResult<()> {
        self.repository.faults_append(report).await?;
        self.repository
            .equipment_set_status(&report.equipment_id, EquipmentStatus::InRepair)
            .await
    }
}
