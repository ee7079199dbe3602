//! Fault report model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::sheet::{cell, format_sheet_date, normalize_id, parse_sheet_date};
use super::validation::not_blank;

/// 1-based column positions in the Faults tab
pub mod columns {
    pub const EQUIPMENT_ID: usize = 1;
    pub const EQUIPMENT_NAME: usize = 2;
    pub const REPORTER: usize = 3;
    pub const DESCRIPTION: usize = 4;
    pub const REPORTED_ON: usize = 5;
    pub const STATUS: usize = 6;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FaultReport {
    pub equipment_id: String,
    pub equipment_name: String,
    pub reporter: String,
    pub description: String,
    pub reported_on: Option<NaiveDate>,
    pub status: String,
}

impl FaultReport {
    pub fn from_row(row: &[String]) -> Option<Self> {
        let equipment_id = normalize_id(cell(row, columns::EQUIPMENT_ID));
        if equipment_id.is_empty() {
            return None;
        }

        Some(Self {
            equipment_id,
            equipment_name: cell(row, columns::EQUIPMENT_NAME).to_string(),
            reporter: cell(row, columns::REPORTER).to_string(),
            description: cell(row, columns::DESCRIPTION).to_string(),
            reported_on: parse_sheet_date(cell(row, columns::REPORTED_ON)),
            status: cell(row, columns::STATUS).to_string(),
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.equipment_id.clone(),
            self.equipment_name.clone(),
            self.reporter.clone(),
            self.description.clone(),
            self.reported_on.map(format_sheet_date).unwrap_or_default(),
            self.status.clone(),
        ]
    }
}

/// Report a fault on a device
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFaultReport {
    #[validate(custom(function = "not_blank", message = "Equipment is required"))]
    pub equipment_id: String,
    #[validate(custom(function = "not_blank", message = "Description is required"))]
    pub description: String,
    #[validate(custom(function = "not_blank", message = "Reporter is required"))]
    pub reporter: String,
}
