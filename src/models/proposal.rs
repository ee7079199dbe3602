//! Purchase proposal model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::enums::ProposalStatus;
use super::sheet::{cell, format_sheet_date, normalize_id, optional_cell, parse_sheet_date};
use super::validation::not_blank;

/// 1-based column positions in the Proposals tab
pub mod columns {
    pub const ID: usize = 1;
    pub const ITEM_NAME: usize = 2;
    pub const REQUESTER: usize = 3;
    pub const PRICE: usize = 4;
    pub const JUSTIFICATION: usize = 5;
    pub const SUBMITTED_ON: usize = 6;
    pub const STATUS: usize = 7;
    pub const MANAGER_COMMENT: usize = 8;
}

/// Purchase proposal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Proposal {
    pub id: String,
    pub item_name: String,
    pub requester: String,
    /// Free text, as typed by the requester
    pub price: String,
    pub justification: String,
    pub submitted_on: Option<NaiveDate>,
    pub status: Option<ProposalStatus>,
    pub manager_comment: Option<String>,
}

impl Proposal {
    pub fn from_row(row: &[String]) -> Option<Self> {
        let id = normalize_id(cell(row, columns::ID));
        if id.is_empty() {
            return None;
        }

        Some(Self {
            id,
            item_name: cell(row, columns::ITEM_NAME).to_string(),
            requester: cell(row, columns::REQUESTER).to_string(),
            price: cell(row, columns::PRICE).to_string(),
            justification: cell(row, columns::JUSTIFICATION).to_string(),
            submitted_on: parse_sheet_date(cell(row, columns::SUBMITTED_ON)),
            status: ProposalStatus::from_label(cell(row, columns::STATUS)),
            manager_comment: optional_cell(row, columns::MANAGER_COMMENT),
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.item_name.clone(),
            self.requester.clone(),
            self.price.clone(),
            self.justification.clone(),
            self.submitted_on.map(format_sheet_date).unwrap_or_default(),
            self.status.map(|s| s.label().to_string()).unwrap_or_default(),
            self.manager_comment.clone().unwrap_or_default(),
        ]
    }
}

/// Submit a new purchase proposal
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProposal {
    #[validate(custom(function = "not_blank", message = "Item name is required"))]
    pub item_name: String,
    #[validate(custom(function = "not_blank", message = "Price is required"))]
    pub price: String,
    #[validate(custom(function = "not_blank", message = "Justification is required"))]
    pub justification: String,
    #[validate(custom(function = "not_blank", message = "Requester is required"))]
    pub requester: String,
}

/// Manager decision on a proposal
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProposalStatus {
    pub status: ProposalStatus,
    #[serde(default)]
    pub comment: String,
}
