//! Calendar projection of reservations and active loans

use chrono::{Days, NaiveDate};

use crate::{
    error::AppResult,
    models::{
        event::{
            CalendarEventKind, DEVICE_RESERVATION_COLOR, LAB_BLOCK_COLOR, LOAN_COLOR,
        },
        CalendarEvent,
    },
    repository::{LabSnapshot, Repository},
};

#[derive(Clone)]
pub struct CalendarService {
    repository: Repository,
}

impl CalendarService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn events(&self, today: NaiveDate) -> AppResult<Vec<CalendarEvent>> {
        let snapshot = self.repository.snapshot().await?;
        Ok(calendar_events(&snapshot, today))
    }
}

/// Reservations first, then checked-out equipment. Ends are exclusive.
pub fn calendar_events(snapshot: &LabSnapshot, today: NaiveDate) -> Vec<CalendarEvent> {
    let mut events = Vec::new();

    for reservation in &snapshot.reservations {
        let Some((start, end)) = reservation.dates() else {
            continue;
        };
        let Some(end) = exclusive_end(end) else {
            continue;
        };

        let event = if reservation.is_whole_lab() {
            CalendarEvent {
                title: format!("LAB BLOCKED: {}", reservation.purpose),
                start,
                end,
                color: LAB_BLOCK_COLOR.to_string(),
                kind: CalendarEventKind::LabBlock,
            }
        } else {
            CalendarEvent {
                title: format!("{} ({})", reservation.equipment_name, reservation.requester),
                start,
                end,
                color: DEVICE_RESERVATION_COLOR.to_string(),
                kind: CalendarEventKind::DeviceReservation,
            }
        };
        events.push(event);
    }

    for equipment in snapshot.equipment.iter().filter(|e| e.is_checked_out()) {
        let Some(end) = equipment.due_date.and_then(exclusive_end) else {
            continue;
        };
        events.push(CalendarEvent {
            title: format!(
                "CHECKED OUT: {} ({})",
                equipment.name,
                equipment.holder.as_deref().unwrap_or("?")
            ),
            start: equipment.checkout_date.unwrap_or(today),
            end,
            color: LOAN_COLOR.to_string(),
            kind: CalendarEventKind::Loan,
        });
    }

    events
}

fn exclusive_end(inclusive_end: NaiveDate) -> Option<NaiveDate> {
    inclusive_end.checked_add_days(Days::new(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EquipmentStatus, Equipment, Reservation, WHOLE_LAB_ID};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn reservation(id: &str, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Reservation {
        Reservation {
            equipment_id: id.to_string(),
            equipment_name: "Microscope".to_string(),
            requester: "Ana".to_string(),
            start_date: start,
            end_date: end,
            purpose: "Research".to_string(),
            row_number: 2,
        }
    }

    fn loan(due: Option<NaiveDate>, checkout: Option<NaiveDate>) -> Equipment {
        Equipment {
            id: "5".to_string(),
            name: "Oscilloscope".to_string(),
            category: None,
            status: Some(EquipmentStatus::CheckedOut),
            holder: Some("Lee".to_string()),
            due_date: due,
            checkout_date: checkout,
        }
    }

    #[test]
    fn test_reservation_events_have_exclusive_end() {
        let snapshot = LabSnapshot {
            reservations: vec![
                reservation("3", Some(d(2024, 1, 30)), Some(d(2024, 1, 31))),
                reservation(WHOLE_LAB_ID, Some(d(2024, 2, 1)), Some(d(2024, 2, 1))),
            ],
            ..LabSnapshot::default()
        };
        let events = calendar_events(&snapshot, d(2024, 1, 1));
        assert_eq!(events.len(), 2);

        assert_eq!(events[0].title, "Microscope (Ana)");
        assert_eq!(events[0].end, d(2024, 2, 1));
        assert_eq!(events[0].kind, CalendarEventKind::DeviceReservation);
        assert_eq!(events[0].color, DEVICE_RESERVATION_COLOR);

        assert_eq!(events[1].title, "LAB BLOCKED: Research");
        assert_eq!(events[1].start, d(2024, 2, 1));
        assert_eq!(events[1].end, d(2024, 2, 2));
        assert_eq!(events[1].color, LAB_BLOCK_COLOR);
    }

    #[test]
    fn test_unreadable_reservations_skipped() {
        let snapshot = LabSnapshot {
            reservations: vec![reservation("3", Some(d(2024, 1, 30)), None)],
            ..LabSnapshot::default()
        };
        assert!(calendar_events(&snapshot, d(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_loan_events() {
        let today = d(2024, 6, 1);
        let mut available = loan(Some(d(2024, 6, 9)), None);
        available.status = Some(EquipmentStatus::Available);

        let snapshot = LabSnapshot {
            equipment: vec![
                loan(Some(d(2024, 6, 10)), Some(d(2024, 6, 3))),
                loan(Some(d(2024, 6, 10)), None),
                loan(None, Some(d(2024, 6, 3))),
                available,
            ],
            ..LabSnapshot::default()
        };
        let events = calendar_events(&snapshot, today);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "CHECKED OUT: Oscilloscope (Lee)");
        assert_eq!(events[0].start, d(2024, 6, 3));
        assert_eq!(events[0].end, d(2024, 6, 11));
        assert_eq!(events[0].color, LOAN_COLOR);
        assert_eq!(events[1].start, today);
    }
}
