//! Equipment model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::enums::EquipmentStatus;
use super::sheet::{cell, normalize_id, optional_cell, parse_sheet_date};
use super::validation::not_blank;

/// 1-based column positions in the Equipment tab
pub mod columns {
    pub const ID: usize = 1;
    pub const NAME: usize = 2;
    pub const CATEGORY: usize = 3;
    pub const STATUS: usize = 4;
    pub const HOLDER: usize = 5;
    pub const DUE_DATE: usize = 6;
    pub const CHECKOUT_DATE: usize = 7;
}

/// Equipment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Equipment {
    /// Normalized identifier
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    /// None when the sheet holds an unknown label
    pub status: Option<EquipmentStatus>,
    /// Current holder while checked out
    pub holder: Option<String>,
    /// Planned return date (inclusive)
    pub due_date: Option<NaiveDate>,
    pub checkout_date: Option<NaiveDate>,
}

impl Equipment {
    /// Build from a sheet row; rows without an identifier are ignored
    pub fn from_row(row: &[String]) -> Option<Self> {
        let id = normalize_id(cell(row, columns::ID));
        if id.is_empty() {
            return None;
        }

        Some(Self {
            id,
            name: cell(row, columns::NAME).to_string(),
            category: optional_cell(row, columns::CATEGORY),
            status: EquipmentStatus::from_label(cell(row, columns::STATUS)),
            holder: optional_cell(row, columns::HOLDER),
            due_date: parse_sheet_date(cell(row, columns::DUE_DATE)),
            checkout_date: parse_sheet_date(cell(row, columns::CHECKOUT_DATE)),
        })
    }

    pub fn is_available(&self) -> bool {
        self.status == Some(EquipmentStatus::Available)
    }

    pub fn is_checked_out(&self) -> bool {
        self.status == Some(EquipmentStatus::CheckedOut)
    }
}

/// Equipment table with today's whole-lab notice
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusBoard {
    /// Set when a whole-lab block covers today
    pub lab_blocked_today: Option<String>,
    pub equipment: Vec<Equipment>,
}

/// Check out one or more devices
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckoutRequest {
    #[validate(length(min = 1, message = "Select at least one device"))]
    pub equipment_ids: Vec<String>,
    #[validate(custom(function = "not_blank", message = "Holder is required"))]
    pub holder: String,
    /// Defaults to today
    pub checkout_date: Option<NaiveDate>,
    /// Planned return date
    pub due_date: NaiveDate,
}

/// Return one or more devices
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReturnRequest {
    #[validate(length(min = 1, message = "Select at least one device"))]
    pub equipment_ids: Vec<String>,
}
