//! Date-range conflict detection against the reservation table
//!
//! Two passes: whole-lab blocks first, then bookings of the requested
//! device. The first overlapping entry wins.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        sheet::{normalize_id, WHOLE_LAB_ID},
        Reservation,
    },
};

/// Closed date interval, both ends booked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Range from user input; `start` after `end` is rejected
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start > end {
            return Err(AppError::Validation(format!(
                "Start date {} is after end date {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// What is being booked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    WholeLab,
    Device(&'a str),
}

impl<'a> Target<'a> {
    pub fn from_id(id: &'a str) -> Self {
        if id.trim() == WHOLE_LAB_ID {
            Target::WholeLab
        } else {
            Target::Device(id)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Available,
    /// Human-readable description of the blocking booking
    Conflict(String),
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

pub fn check_availability(
    target: Target<'_>,
    range: DateRange,
    reservations: &[Reservation],
) -> Availability {
    for reservation in reservations.iter().filter(|r| r.is_whole_lab()) {
        if booked_range(reservation).is_some_and(|booked| booked.overlaps(&range)) {
            return Availability::Conflict(format!(
                "Entire lab blocked by {}",
                reservation.requester
            ));
        }
    }

    if let Target::Device(id) = target {
        let id = normalize_id(id);
        for reservation in reservations.iter().filter(|r| r.equipment_id == id) {
            if booked_range(reservation).is_some_and(|booked| booked.overlaps(&range)) {
                return Availability::Conflict(format!(
                    "{} ({})",
                    reservation.requester, reservation.purpose
                ));
            }
        }
    }

    Availability::Available
}

/// Rows with unreadable dates never conflict; they are logged so the sheet
/// can be fixed.
fn booked_range(reservation: &Reservation) -> Option<DateRange> {
    match reservation.dates() {
        Some((start, end)) => Some(DateRange { start, end }),
        None => {
            tracing::warn!(
                row = reservation.row_number,
                equipment_id = %reservation.equipment_id,
                "Reservation has unreadable dates, ignoring it for conflict checks"
            );
            None
        }
    }
}
