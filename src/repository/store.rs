//! Table store abstraction over the lab workbook
//!
//! Rows are addressed the way the spreadsheet addresses them: row 1 is the
//! header, data starts at row 2, and columns are 1-based.

use std::path::Path;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::sheet::{normalize_id, Worksheet};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Worksheet '{0}' not found")]
    MissingWorksheet(String),

    #[error("Workbook '{0}' not found")]
    WorkbookNotFound(String),

    #[error("Store is not connected")]
    NotConnected,

    #[error("Row {row} does not exist in '{worksheet}'")]
    RowOutOfRange { worksheet: String, row: usize },

    #[error("Seed file error: {0}")]
    Seed(String),
}

/// Remote tabular store holding the lab workbook
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Open the workbook; called before any other operation
    async fn connect(&self) -> Result<(), StoreError>;

    /// Data rows of a tab, header excluded. Index `i` is sheet row `i + 2`.
    async fn read_rows(&self, sheet: Worksheet) -> Result<Vec<Vec<String>>, StoreError>;

    async fn append_row(&self, sheet: Worksheet, values: Vec<String>) -> Result<(), StoreError>;

    /// Sheet row number of the first data row whose `column` holds `value`
    /// as an identifier
    async fn find_row(
        &self,
        sheet: Worksheet,
        column: usize,
        value: &str,
    ) -> Result<Option<usize>, StoreError>;

    async fn update_cell(
        &self,
        sheet: Worksheet,
        row: usize,
        column: usize,
        value: &str,
    ) -> Result<(), StoreError>;
}

/// Render a JSON cell the way the spreadsheet displays it
pub(crate) fn cell_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// In-process workbook used for local runs and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    tabs: RwLock<IndexMap<String, Vec<Vec<String>>>>,
}

impl MemoryStore {
    /// Workbook with all five tabs and their header rows
    pub fn new() -> Self {
        let tabs = Worksheet::ALL
            .into_iter()
            .map(|sheet| (sheet.title().to_string(), vec![header_row(sheet)]))
            .collect();
        Self {
            tabs: RwLock::new(tabs),
        }
    }

    /// Workbook with no tabs at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a JSON object of `tab title -> rows`, first row being the header
    pub fn from_seed_file(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Seed(format!("{}: {}", path.display(), e)))?;
        Self::from_seed_json(&raw)
    }

    pub fn from_seed_json(raw: &str) -> Result<Self, StoreError> {
        let seed: IndexMap<String, Vec<Vec<Value>>> =
            serde_json::from_str(raw).map_err(|e| StoreError::Seed(e.to_string()))?;

        let tabs = seed
            .into_iter()
            .map(|(title, rows)| {
                let rows = rows
                    .iter()
                    .map(|row| row.iter().map(cell_to_string).collect())
                    .collect();
                (title, rows)
            })
            .collect();

        Ok(Self {
            tabs: RwLock::new(tabs),
        })
    }

    /// Builder used by tests: replace a tab's data rows, keeping the header
    pub fn with_rows(mut self, sheet: Worksheet, rows: &[&[&str]]) -> Self {
        let mut table = vec![header_row(sheet)];
        table.extend(
            rows.iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect::<Vec<_>>()),
        );
        self.tabs.get_mut().insert(sheet.title().to_string(), table);
        self
    }

    /// Drop a tab entirely
    pub fn without(mut self, sheet: Worksheet) -> Self {
        self.tabs.get_mut().shift_remove(sheet.title());
        self
    }

    /// Current data rows of a tab, header excluded
    pub async fn rows(&self, sheet: Worksheet) -> Vec<Vec<String>> {
        self.tabs
            .read()
            .await
            .get(sheet.title())
            .map(|table| table.iter().skip(1).cloned().collect())
            .unwrap_or_default()
    }
}

fn header_row(sheet: Worksheet) -> Vec<String> {
    sheet.headers().iter().map(|h| h.to_string()).collect()
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn connect(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn read_rows(&self, sheet: Worksheet) -> Result<Vec<Vec<String>>, StoreError> {
        let tabs = self.tabs.read().await;
        let table = tabs
            .get(sheet.title())
            .ok_or_else(|| StoreError::MissingWorksheet(sheet.title().to_string()))?;
        Ok(table.iter().skip(1).cloned().collect())
    }

    async fn append_row(&self, sheet: Worksheet, values: Vec<String>) -> Result<(), StoreError> {
        let mut tabs = self.tabs.write().await;
        let table = tabs
            .get_mut(sheet.title())
            .ok_or_else(|| StoreError::MissingWorksheet(sheet.title().to_string()))?;
        table.push(values);
        Ok(())
    }

    async fn find_row(
        &self,
        sheet: Worksheet,
        column: usize,
        value: &str,
    ) -> Result<Option<usize>, StoreError> {
        let tabs = self.tabs.read().await;
        let table = tabs
            .get(sheet.title())
            .ok_or_else(|| StoreError::MissingWorksheet(sheet.title().to_string()))?;
        let needle = normalize_id(value);

        Ok(table
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, row)| {
                column
                    .checked_sub(1)
                    .and_then(|idx| row.get(idx))
                    .is_some_and(|cell| normalize_id(cell) == needle)
            })
            .map(|(idx, _)| idx + 1))
    }

    async fn update_cell(
        &self,
        sheet: Worksheet,
        row: usize,
        column: usize,
        value: &str,
    ) -> Result<(), StoreError> {
        let mut tabs = self.tabs.write().await;
        let table = tabs
            .get_mut(sheet.title())
            .ok_or_else(|| StoreError::MissingWorksheet(sheet.title().to_string()))?;

        let out_of_range = || StoreError::RowOutOfRange {
            worksheet: sheet.title().to_string(),
            row,
        };
        if row == 0 || column == 0 {
            return Err(out_of_range());
        }
        let cells = table.get_mut(row - 1).ok_or_else(out_of_range)?;
        if cells.len() < column {
            cells.resize(column, String::new());
        }
        cells[column - 1] = value.to_string();
        Ok(())
    }
}
