//! Fault reports domain methods on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::{sheet::Worksheet, FaultReport},
};

impl Repository {
    pub async fn faults_append(&self, report: &FaultReport) -> AppResult<()> {
        self.store()
            .await?
            .append_row(Worksheet::Faults, report.to_row())
            .await?;
        Ok(())
    }
}
