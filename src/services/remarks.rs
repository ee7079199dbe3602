//! Remark box service

use chrono::NaiveDate;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{remark::CreateRemark, Remark},
    repository::Repository,
};

#[derive(Clone)]
pub struct RemarksService {
    repository: Repository,
}

impl RemarksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Remark>> {
        Ok(self.repository.snapshot().await?.remarks.clone())
    }

    pub async fn submit(&self, request: &CreateRemark, today: NaiveDate) -> AppResult<Remark> {
        request.validate()?;
        let remark = Remark {
            date: Some(today),
            author: request.author.trim().to_string(),
            text: request.text.trim().to_string(),
            category: request.category.label().to_string(),
        };

        let written = self.repository.remarks_append(&remark).await;
        self.repository.invalidate().await;
        written?;
        Ok(remark)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::StoreConfig, error::AppError, models::{sheet::Worksheet, RemarkCategory},
        repository::store::MemoryStore,
    };

    #[tokio::test]
    async fn test_submit_remark() {
        let store = Arc::new(MemoryStore::new());
        let service = RemarksService::new(Repository::new(store.clone(), &StoreConfig::default()));

        service
            .submit(
                &CreateRemark {
                    author: "Lee".into(),
                    category: RemarkCategory::MissingSupplies,
                    text: "Out of nitrile gloves".into(),
                },
                NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            store.rows(Worksheet::Remarks).await,
            vec![vec!["2024-10-01", "Lee", "Out of nitrile gloves", "Missing supplies"]]
        );
    }

    #[tokio::test]
    async fn test_submit_remark_rejects_blank_fields() {
        let store = Arc::new(MemoryStore::new());
        let service = RemarksService::new(Repository::new(store.clone(), &StoreConfig::default()));

        let err = service
            .submit(
                &CreateRemark {
                    author: " ".into(),
                    category: RemarkCategory::Other,
                    text: "\t".into(),
                },
                NaiveDate::from_ymd_opt(2024, 2, 3).unwrap(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.rows(Worksheet::Remarks).await.is_empty());
    }

    #[tokio::test]
    async fn test_submit_remark_missing_tab() {
        let store = Arc::new(MemoryStore::new().without(Worksheet::Remarks));
        let service = RemarksService::new(Repository::new(store, &StoreConfig::default()));

        let err = service
            .submit(
                &CreateRemark {
                    author: "Lee".into(),
                    category: RemarkCategory::Other,
                    text: "Door sticks".into(),
                },
                NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
    }
}
