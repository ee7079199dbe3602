//! Worksheet names and positional cell helpers shared by all row models

use chrono::NaiveDate;

/// Equipment identifier meaning "the entire laboratory"
pub const WHOLE_LAB_ID: &str = "WHOLE_LAB";

/// Equipment name written next to the whole-lab sentinel
pub const WHOLE_LAB_NAME: &str = "ENTIRE LAB";

/// Date format used in every date cell
pub const SHEET_DATE_FORMAT: &str = "%Y-%m-%d";

/// Tabs of the lab workbook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Worksheet {
    Equipment,
    Reservations,
    Proposals,
    Faults,
    Remarks,
}

impl Worksheet {
    pub const ALL: [Worksheet; 5] = [
        Worksheet::Equipment,
        Worksheet::Reservations,
        Worksheet::Proposals,
        Worksheet::Faults,
        Worksheet::Remarks,
    ];

    /// Header row written when a tab is created
    pub fn headers(self) -> &'static [&'static str] {
        match self {
            Worksheet::Equipment => &[
                "ID", "Name", "Category", "Status", "Holder", "DueDate", "CheckoutDate",
            ],
            Worksheet::Reservations => &[
                "EquipmentID", "EquipmentName", "Requester", "StartDate", "EndDate", "Purpose",
            ],
            Worksheet::Proposals => &[
                "ID", "ItemName", "Requester", "Price", "Justification", "SubmittedOn", "Status",
                "ManagerComment",
            ],
            Worksheet::Faults => &[
                "EquipmentID", "EquipmentName", "Reporter", "Description", "ReportedOn", "Status",
            ],
            Worksheet::Remarks => &["Date", "Author", "Text", "Category"],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Worksheet::Equipment => "Equipment",
            Worksheet::Reservations => "Reservations",
            Worksheet::Proposals => "Proposals",
            Worksheet::Faults => "Faults",
            Worksheet::Remarks => "Remarks",
        }
    }
}

impl std::fmt::Display for Worksheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Cell at 1-based `column`, empty when the row is short
pub fn cell(row: &[String], column: usize) -> &str {
    column
        .checked_sub(1)
        .and_then(|idx| row.get(idx))
        .map(|v| v.trim())
        .unwrap_or("")
}

/// Non-empty cell at 1-based `column`
pub fn optional_cell(row: &[String], column: usize) -> Option<String> {
    let value = cell(row, column);
    (!value.is_empty()).then(|| value.to_string())
}

/// Identifiers read back from numeric cells come as `7.0`
pub fn normalize_id(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_suffix(".0").unwrap_or(trimmed).trim().to_string()
}

pub fn parse_sheet_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), SHEET_DATE_FORMAT).ok()
}

pub fn format_sheet_date(date: NaiveDate) -> String {
    date.format(SHEET_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id("12.0"), "12");
        assert_eq!(normalize_id(" EQ-1 "), "EQ-1");
        assert_eq!(normalize_id("3.05"), "3.05");
        assert_eq!(normalize_id("10.0 "), "10");
    }

    #[test]
    fn test_cell_positions() {
        let row = vec!["a".to_string(), " b ".to_string()];
        assert_eq!(cell(&row, 1), "a");
        assert_eq!(cell(&row, 2), "b");
        assert_eq!(cell(&row, 3), "");
        assert_eq!(cell(&row, 0), "");
        assert_eq!(optional_cell(&row, 3), None);
    }

    #[test]
    fn test_parse_sheet_date() {
        assert_eq!(
            parse_sheet_date("2024-02-01"),
            NaiveDate::from_ymd_opt(2024, 2, 1)
        );
        assert_eq!(parse_sheet_date("01/02/2024"), None);
        assert_eq!(parse_sheet_date(""), None);
    }
}
