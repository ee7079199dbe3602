//! Equipment domain methods on Repository
//!
//! Every write locates the row by ID first, then overwrites single cells.
//! Nothing is transactional: a failure between two cell writes leaves the
//! row half-updated.

use chrono::NaiveDate;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::EquipmentStatus,
        equipment::columns,
        sheet::{format_sheet_date, Worksheet},
    },
};

impl Repository {
    /// Sheet row of a device, located by ID in column 1
    pub async fn equipment_find_row(&self, id: &str) -> AppResult<usize> {
        self.store()
            .await?
            .find_row(Worksheet::Equipment, columns::ID, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Write status, holder, due date and checkout date (columns 4-7)
    pub async fn equipment_mark_checked_out(
        &self,
        id: &str,
        holder: &str,
        checkout_date: NaiveDate,
        due_date: NaiveDate,
    ) -> AppResult<()> {
        let row = self.equipment_find_row(id).await?;
        let store = self.store().await?;
        let sheet = Worksheet::Equipment;

        store
            .update_cell(sheet, row, columns::STATUS, EquipmentStatus::CheckedOut.label())
            .await?;
        store.update_cell(sheet, row, columns::HOLDER, holder).await?;
        store
            .update_cell(sheet, row, columns::DUE_DATE, &format_sheet_date(due_date))
            .await?;
        store
            .update_cell(sheet, row, columns::CHECKOUT_DATE, &format_sheet_date(checkout_date))
            .await?;
        Ok(())
    }

    /// Back to Available with holder, due date and checkout date cleared
    pub async fn equipment_mark_returned(&self, id: &str) -> AppResult<()> {
        let row = self.equipment_find_row(id).await?;
        let store = self.store().await?;
        let sheet = Worksheet::Equipment;

        store
            .update_cell(sheet, row, columns::STATUS, EquipmentStatus::Available.label())
            .await?;
        for column in [columns::HOLDER, columns::DUE_DATE, columns::CHECKOUT_DATE] {
            store.update_cell(sheet, row, column, "").await?;
        }
        Ok(())
    }

    pub async fn equipment_set_status(&self, id: &str, status: EquipmentStatus) -> AppResult<()> {
        let row = self.equipment_find_row(id).await?;
        self.store()
            .await?
            .update_cell(Worksheet::Equipment, row, columns::STATUS, status.label())
            .await?;
        Ok(())
    }
}
