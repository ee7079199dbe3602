//! Calendar entry model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Colour of per-device reservations
pub const DEVICE_RESERVATION_COLOR: &str = "#3788d8";
/// Colour of whole-lab blocks
pub const LAB_BLOCK_COLOR: &str = "#ff9f89";
/// Colour of active loans
pub const LOAN_COLOR: &str = "#d83737";

/// What produced a calendar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CalendarEventKind {
    LabBlock,
    DeviceReservation,
    Loan,
}

/// All-day calendar entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CalendarEvent {
    pub title: String,
    pub start: NaiveDate,
    /// Exclusive, one day past the last booked day
    pub end: NaiveDate,
    pub color: String,
    pub kind: CalendarEventKind,
}
