//! Remarks domain methods on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::{sheet::Worksheet, Remark},
};

impl Repository {
    pub async fn remarks_append(&self, remark: &Remark) -> AppResult<()> {
        self.store()
            .await?
            .append_row(Worksheet::Remarks, remark.to_row())
            .await?;
        Ok(())
    }
}
