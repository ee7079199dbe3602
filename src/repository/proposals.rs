//! Purchase proposals domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{enums::ProposalStatus, proposal::columns, sheet::Worksheet, Proposal},
};

impl Repository {
    pub async fn proposals_append(&self, proposal: &Proposal) -> AppResult<()> {
        self.store()
            .await?
            .append_row(Worksheet::Proposals, proposal.to_row())
            .await?;
        Ok(())
    }

    /// Overwrite status (column 7) and manager comment (column 8)
    pub async fn proposals_update_status(
        &self,
        id: &str,
        status: ProposalStatus,
        comment: &str,
    ) -> AppResult<()> {
        let store = self.store().await?;
        let row = store
            .find_row(Worksheet::Proposals, columns::ID, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Proposal {} not found", id)))?;

        store
            .update_cell(Worksheet::Proposals, row, columns::STATUS, status.label())
            .await?;
        store
            .update_cell(Worksheet::Proposals, row, columns::MANAGER_COMMENT, comment)
            .await?;
        Ok(())
    }
}
