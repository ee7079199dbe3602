//! Data models for Labtrack

pub mod batch;
pub mod enums;
pub mod equipment;
pub mod event;
pub mod fault;
pub mod proposal;
pub mod remark;
pub mod reservation;
pub mod sheet;
pub mod validation;

// Re-export commonly used types
pub use batch::{BatchReport, ItemOutcome, Outcome};
pub use enums::{EquipmentStatus, ProposalStatus, RemarkCategory, ReservationPurpose};
pub use equipment::Equipment;
pub use event::CalendarEvent;
pub use fault::FaultReport;
pub use proposal::Proposal;
pub use remark::Remark;
pub use reservation::Reservation;
pub use sheet::{Worksheet, WHOLE_LAB_ID};
