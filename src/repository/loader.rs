//! Whole-workbook load with TTL memoization

use std::sync::Arc;

use super::{store::TableStore, Repository};
use crate::{
    error::AppResult,
    models::{
        sheet::Worksheet, Equipment, FaultReport, Proposal, Remark, Reservation,
    },
};

/// Everything the dashboard reads, fetched in one go
#[derive(Debug, Clone, Default)]
pub struct LabSnapshot {
    pub equipment: Vec<Equipment>,
    pub reservations: Vec<Reservation>,
    pub proposals: Vec<Proposal>,
    pub faults: Vec<FaultReport>,
    pub remarks: Vec<Remark>,
}

impl LabSnapshot {
    pub fn equipment_by_id(&self, id: &str) -> Option<&Equipment> {
        self.equipment.iter().find(|e| e.id == id)
    }
}

impl Repository {
    /// Memoized snapshot of all tabs
    pub async fn snapshot(&self) -> AppResult<Arc<LabSnapshot>> {
        let store = self.store().await?;
        Ok(self
            .snapshot
            .get_with((), async { Arc::new(load_snapshot(store).await) })
            .await)
    }

    /// Drop the memoized snapshot so the next read hits the store
    pub async fn invalidate(&self) {
        self.snapshot.invalidate(&()).await;
        tracing::debug!("Snapshot cache invalidated");
    }
}

async fn load_snapshot(store: &dyn TableStore) -> LabSnapshot {
    let equipment = read_tab(store, Worksheet::Equipment)
        .await
        .iter()
        .filter_map(|row| Equipment::from_row(row))
        .collect();

    let reservations = read_tab(store, Worksheet::Reservations)
        .await
        .iter()
        .enumerate()
        .filter_map(|(idx, row)| Reservation::from_row(row, idx + 2))
        .collect();

    let proposals = read_tab(store, Worksheet::Proposals)
        .await
        .iter()
        .filter_map(|row| Proposal::from_row(row))
        .collect();

    let faults = read_tab(store, Worksheet::Faults)
        .await
        .iter()
        .filter_map(|row| FaultReport::from_row(row))
        .collect();

    let remarks = read_tab(store, Worksheet::Remarks)
        .await
        .iter()
        .filter_map(|row| Remark::from_row(row))
        .collect();

    let snapshot = LabSnapshot {
        equipment,
        reservations,
        proposals,
        faults,
        remarks,
    };
    tracing::debug!(
        equipment = snapshot.equipment.len(),
        reservations = snapshot.reservations.len(),
        proposals = snapshot.proposals.len(),
        "Loaded workbook snapshot"
    );
    snapshot
}

/// A missing or unreadable tab loads as empty
async fn read_tab(store: &dyn TableStore, sheet: Worksheet) -> Vec<Vec<String>> {
    match store.read_rows(sheet).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!("Could not read worksheet '{}', using empty table: {}", sheet, e);
            Vec::new()
        }
    }
}
