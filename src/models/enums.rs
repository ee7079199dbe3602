//! Shared domain enums and their spreadsheet labels

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

/// Status of an equipment row (column 4 of the Equipment tab)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    Available,
    CheckedOut,
    InRepair,
}

impl EquipmentStatus {
    /// Label stored in the sheet
    pub fn label(self) -> &'static str {
        match self {
            EquipmentStatus::Available => "Available",
            EquipmentStatus::CheckedOut => "Checked out",
            EquipmentStatus::InRepair => "In repair",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Available" => Some(EquipmentStatus::Available),
            "Checked out" => Some(EquipmentStatus::CheckedOut),
            "In repair" => Some(EquipmentStatus::InRepair),
            _ => None,
        }
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// ProposalStatus
// ---------------------------------------------------------------------------

/// Purchase proposal workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Pending,
    Approved,
    Rejected,
    Purchased,
}

impl ProposalStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProposalStatus::Pending => "Pending",
            ProposalStatus::Approved => "Approved",
            ProposalStatus::Rejected => "Rejected",
            ProposalStatus::Purchased => "Purchased",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Pending" => Some(ProposalStatus::Pending),
            "Approved" => Some(ProposalStatus::Approved),
            "Rejected" => Some(ProposalStatus::Rejected),
            "Purchased" => Some(ProposalStatus::Purchased),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// ReservationPurpose
// ---------------------------------------------------------------------------

/// Why the lab or a device is booked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReservationPurpose {
    Research,
    Classes,
    Other,
}

impl ReservationPurpose {
    pub fn label(self) -> &'static str {
        match self {
            ReservationPurpose::Research => "Research",
            ReservationPurpose::Classes => "Classes",
            ReservationPurpose::Other => "Other",
        }
    }
}

// ---------------------------------------------------------------------------
// RemarkCategory
// ---------------------------------------------------------------------------

/// Remark box category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RemarkCategory {
    MissingSupplies,
    Other,
}

impl RemarkCategory {
    pub fn label(self) -> &'static str {
        match self {
            RemarkCategory::MissingSupplies => "Missing supplies",
            RemarkCategory::Other => "Other",
        }
    }
}

/// Status written on a freshly reported fault
pub const FAULT_STATUS_OPEN: &str = "Open";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_status_labels() {
        for status in [
            EquipmentStatus::Available,
            EquipmentStatus::CheckedOut,
            EquipmentStatus::InRepair,
        ] {
            assert_eq!(EquipmentStatus::from_label(status.label()), Some(status));
        }
        assert_eq!(EquipmentStatus::from_label(" Available "), Some(EquipmentStatus::Available));
        assert_eq!(EquipmentStatus::from_label("Broken"), None);
    }

    #[test]
    fn test_proposal_status_json() {
        let status: ProposalStatus = serde_json::from_str("\"purchased\"").unwrap();
        assert_eq!(status, ProposalStatus::Purchased);
        assert_eq!(status.label(), "Purchased");
    }
}
