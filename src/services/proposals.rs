//! Purchase proposals service

use chrono::NaiveDate;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::ProposalStatus,
        proposal::{CreateProposal, UpdateProposalStatus},
        sheet::normalize_id,
        Proposal,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ProposalsService {
    repository: Repository,
}

impl ProposalsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Proposal>> {
        Ok(self.repository.snapshot().await?.proposals.clone())
    }

    /// New proposals start as Pending with an empty manager comment
    pub async fn submit(&self, request: &CreateProposal, today: NaiveDate) -> AppResult<Proposal> {
        request.validate()?;
        let snapshot = self.repository.snapshot().await?;

        let proposal = Proposal {
            id: next_id(&snapshot.proposals).to_string(),
            item_name: request.item_name.trim().to_string(),
            requester: request.requester.trim().to_string(),
            price: request.price.trim().to_string(),
            justification: request.justification.trim().to_string(),
            submitted_on: Some(today),
            status: Some(ProposalStatus::Pending),
            manager_comment: None,
        };

        let written = self.repository.proposals_append(&proposal).await;
        self.repository.invalidate().await;
        written?;

        tracing::info!("Proposal {} submitted by {}", proposal.id, proposal.requester);
        Ok(proposal)
    }

    /// Manager decision: overwrite status and comment
    pub async fn update_status(&self, id: &str, request: &UpdateProposalStatus) -> AppResult<()> {
        let id = normalize_id(id);
        if id.is_empty() {
            return Err(AppError::BadRequest("Proposal id is required".to_string()));
        }
        let written = self
            .repository
            .proposals_update_status(&id, request.status, request.comment.trim())
            .await;
        self.repository.invalidate().await;
        written?;

        tracing::info!("Proposal {} set to {}", id, request.status);
        Ok(())
    }
}

/// One past the highest numeric id, never below the row count plus one
fn next_id(proposals: &[Proposal]) -> u64 {
    let highest = proposals
        .iter()
        .filter_map(|p| p.id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    highest.max(proposals.len() as u64) + 1
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::StoreConfig, models::sheet::Worksheet, repository::store::MemoryStore,
    };

    fn proposal(id: &str) -> Proposal {
        Proposal {
            id: id.to_string(),
            item_name: "Pipettes".to_string(),
            requester: "Ana".to_string(),
            price: "120".to_string(),
            justification: "Broken set".to_string(),
            submitted_on: None,
            status: Some(ProposalStatus::Pending),
            manager_comment: None,
        }
    }

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(&[]), 1);
        assert_eq!(next_id(&[proposal("1"), proposal("2")]), 3);
        assert_eq!(next_id(&[proposal("1"), proposal("7")]), 8);
        assert_eq!(next_id(&[proposal("A"), proposal("B")]), 3);
    }

    #[tokio::test]
    async fn test_submit_and_update() {
        let store = Arc::new(MemoryStore::new());
        let service = ProposalsService::new(Repository::new(store.clone(), &StoreConfig::default()));
        let today = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();

        let created = service
            .submit(
                &CreateProposal {
                    item_name: "Fume hood filter".into(),
                    price: "450 EUR".into(),
                    justification: "Filter expired".into(),
                    requester: "Kim".into(),
                },
                today,
            )
            .await
            .unwrap();
        assert_eq!(created.id, "1");

        service
            .update_status(
                "1",
                &UpdateProposalStatus {
                    status: ProposalStatus::Approved,
                    comment: "Order in October".into(),
                },
            )
            .await
            .unwrap();

        let rows = store.rows(Worksheet::Proposals).await;
        assert_eq!(
            rows[0],
            vec![
                "1",
                "Fume hood filter",
                "Kim",
                "450 EUR",
                "Filter expired",
                "2024-09-02",
                "Approved",
                "Order in October"
            ]
        );

        let listed = service.list().await.unwrap();
        assert_eq!(listed[0].status, Some(ProposalStatus::Approved));
    }

    #[tokio::test]
    async fn test_submit_rejects_blank_price() {
        let store = Arc::new(MemoryStore::new());
        let service = ProposalsService::new(Repository::new(store.clone(), &StoreConfig::default()));

        let err = service
            .submit(
                &CreateProposal {
                    item_name: "Glove box".into(),
                    price: "  ".into(),
                    justification: "Anaerobic work".into(),
                    requester: "Kim".into(),
                },
                NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg.contains("Price")));
        assert!(store.rows(Worksheet::Proposals).await.is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_proposal() {
        let service = ProposalsService::new(Repository::new(
            Arc::new(MemoryStore::new()),
            &StoreConfig::default(),
        ));
        let err = service
            .update_status(
                "5",
                &UpdateProposalStatus {
                    status: ProposalStatus::Rejected,
                    comment: String::new(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
