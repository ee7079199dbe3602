//! Reservation model (whole-lab blocks and per-device bookings)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::ReservationPurpose;
use super::sheet::{cell, format_sheet_date, normalize_id, parse_sheet_date, WHOLE_LAB_ID};
use super::validation::not_blank;

/// 1-based column positions in the Reservations tab
pub mod columns {
    pub const EQUIPMENT_ID: usize = 1;
    pub const EQUIPMENT_NAME: usize = 2;
    pub const REQUESTER: usize = 3;
    pub const START_DATE: usize = 4;
    pub const END_DATE: usize = 5;
    pub const PURPOSE: usize = 6;
}

/// Reservation record. Dates are `None` when the cell could not be parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reservation {
    /// Equipment identifier or `WHOLE_LAB`
    pub equipment_id: String,
    pub equipment_name: String,
    pub requester: String,
    pub start_date: Option<NaiveDate>,
    /// Inclusive
    pub end_date: Option<NaiveDate>,
    pub purpose: String,
    /// Sheet row number, header is row 1
    #[serde(skip)]
    pub row_number: usize,
}

impl Reservation {
    pub fn from_row(row: &[String], row_number: usize) -> Option<Self> {
        let equipment_id = normalize_id(cell(row, columns::EQUIPMENT_ID));
        if equipment_id.is_empty() {
            return None;
        }

        Some(Self {
            equipment_id,
            equipment_name: cell(row, columns::EQUIPMENT_NAME).to_string(),
            requester: cell(row, columns::REQUESTER).to_string(),
            start_date: parse_sheet_date(cell(row, columns::START_DATE)),
            end_date: parse_sheet_date(cell(row, columns::END_DATE)),
            purpose: cell(row, columns::PURPOSE).to_string(),
            row_number,
        })
    }

    /// Row as appended to the Reservations tab
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.equipment_id.clone(),
            self.equipment_name.clone(),
            self.requester.clone(),
            self.start_date.map(format_sheet_date).unwrap_or_default(),
            self.end_date.map(format_sheet_date).unwrap_or_default(),
            self.purpose.clone(),
        ]
    }

    pub fn is_whole_lab(&self) -> bool {
        self.equipment_id == WHOLE_LAB_ID
    }

    /// Both dates, when both parsed
    pub fn dates(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start_date?, self.end_date?))
    }
}

/// Block the entire lab for a date range
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReserveLabRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub purpose: ReservationPurpose,
    #[validate(custom(function = "not_blank", message = "Responsible person is required"))]
    pub requester: String,
}

/// Reserve several devices for classes or research
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PlanDevicesRequest {
    #[validate(length(min = 1, message = "Select at least one device"))]
    pub equipment_ids: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub purpose: ReservationPurpose,
    #[validate(custom(function = "not_blank", message = "Instructor is required"))]
    pub requester: String,
}

/// Availability lookup
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AvailabilityQuery {
    /// Equipment identifier, or `WHOLE_LAB`
    pub equipment_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Availability answer
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub available: bool,
    /// Who holds the conflicting booking
    pub conflict: Option<String>,
}
