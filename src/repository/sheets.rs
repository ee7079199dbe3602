//! Google Sheets backed table store
//!
//! Uses the Sheets v4 values API with a pre-issued bearer token. When no
//! spreadsheet ID is configured the workbook is looked up by title through
//! the Drive v3 files API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use super::store::{cell_to_string, StoreError, TableStore};
use crate::{
    config::SheetsConfig,
    models::sheet::{normalize_id, Worksheet},
};

const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

pub struct SheetsStore {
    client: Client,
    config: SheetsConfig,
    spreadsheet_id: RwLock<Option<String>>,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Deserialize)]
struct GoogleErrorBody {
    error: GoogleError,
}

#[derive(Deserialize)]
struct GoogleError {
    message: String,
}

impl SheetsStore {
    pub fn new(config: SheetsConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            spreadsheet_id: RwLock::new(None),
        })
    }

    async fn spreadsheet_id(&self) -> Result<String, StoreError> {
        self.spreadsheet_id
            .read()
            .await
            .clone()
            .ok_or(StoreError::NotConnected)
    }

    /// `{sheets_api_url}/spreadsheets/{id}/values/{range}`
    async fn values_url(&self, range: &str) -> Result<Url, StoreError> {
        let id = self.spreadsheet_id().await?;
        api_url(&self.config.sheets_api_url, &["spreadsheets", &id, "values", range])
    }

    async fn get_values(&self, sheet: Worksheet, range: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let url = self.values_url(range).await?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await?;
        let body: ValueRange = check(response, Some(sheet)).await?.json().await?;

        Ok(body
            .values
            .iter()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect())
    }

    async fn resolve_by_title(&self) -> Result<String, StoreError> {
        let mut url = api_url(&self.config.drive_api_url, &["files"])?;
        let query = format!(
            "name = '{}' and mimeType = '{}' and trashed = false",
            self.config.workbook.replace('\'', "\\'"),
            SPREADSHEET_MIME
        );
        url.query_pairs_mut()
            .append_pair("q", &query)
            .append_pair("fields", "files(id)");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await?;
        let list: DriveFileList = check(response, None).await?.json().await?;

        list.files
            .into_iter()
            .next()
            .map(|f| f.id)
            .ok_or_else(|| StoreError::WorkbookNotFound(self.config.workbook.clone()))
    }

    async fn verify_spreadsheet(&self, id: &str) -> Result<(), StoreError> {
        let mut url = api_url(&self.config.sheets_api_url, &["spreadsheets", id])?;
        url.query_pairs_mut().append_pair("fields", "spreadsheetId");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await?;
        check(response, None).await?;
        Ok(())
    }
}

#[async_trait]
impl TableStore for SheetsStore {
    async fn connect(&self) -> Result<(), StoreError> {
        let id = match &self.config.spreadsheet_id {
            Some(id) => id.clone(),
            None => self.resolve_by_title().await?,
        };
        self.verify_spreadsheet(&id).await?;

        tracing::info!("Opened workbook '{}' ({})", self.config.workbook, id);
        *self.spreadsheet_id.write().await = Some(id);
        Ok(())
    }

    async fn read_rows(&self, sheet: Worksheet) -> Result<Vec<Vec<String>>, StoreError> {
        let rows = self.get_values(sheet, &tab_range(sheet)).await?;
        Ok(rows.into_iter().skip(1).collect())
    }

    async fn append_row(&self, sheet: Worksheet, values: Vec<String>) -> Result<(), StoreError> {
        let mut url = self.values_url(&format!("{}:append", tab_range(sheet))).await?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.access_token)
            .json(&json!({ "values": [values] }))
            .send()
            .await?;
        check(response, Some(sheet)).await?;
        Ok(())
    }

    async fn find_row(
        &self,
        sheet: Worksheet,
        column: usize,
        value: &str,
    ) -> Result<Option<usize>, StoreError> {
        let letter = column_letter(column).ok_or_else(|| StoreError::RowOutOfRange {
            worksheet: sheet.title().to_string(),
            row: 0,
        })?;
        let range = format!("{}!{letter}:{letter}", quoted_title(sheet));
        let cells = self.get_values(sheet, &range).await?;
        let needle = normalize_id(value);

        Ok(cells
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, row)| row.first().is_some_and(|c| normalize_id(c) == needle))
            .map(|(idx, _)| idx + 1))
    }

    async fn update_cell(
        &self,
        sheet: Worksheet,
        row: usize,
        column: usize,
        value: &str,
    ) -> Result<(), StoreError> {
        let out_of_range = || StoreError::RowOutOfRange {
            worksheet: sheet.title().to_string(),
            row,
        };
        let letter = column_letter(column).ok_or_else(out_of_range)?;
        if row == 0 {
            return Err(out_of_range());
        }

        let range = format!("{}!{letter}{row}", quoted_title(sheet));
        let mut url = self.values_url(&range).await?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let response = self
            .client
            .put(url)
            .bearer_auth(&self.config.access_token)
            .json(&json!({ "range": range, "values": [[value]] }))
            .send()
            .await?;
        check(response, Some(sheet)).await?;
        Ok(())
    }
}

/// Turn non-2xx responses into `StoreError`
async fn check(response: Response, sheet: Option<Worksheet>) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<GoogleErrorBody>()
        .await
        .map(|body| body.error.message)
        .unwrap_or_else(|_| status.to_string());

    // The values API answers an unknown tab with 400 "Unable to parse range"
    if let Some(sheet) = sheet {
        if status.as_u16() == 400 && message.contains("Unable to parse range") {
            return Err(StoreError::MissingWorksheet(sheet.title().to_string()));
        }
    }

    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

fn api_url(base: &str, segments: &[&str]) -> Result<Url, StoreError> {
    let invalid = || StoreError::Api {
        status: 0,
        message: format!("Invalid API base URL: {}", base),
    };
    let mut url = Url::parse(base).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn quoted_title(sheet: Worksheet) -> String {
    format!("'{}'", sheet.title())
}

/// Whole-tab range in A1 notation
fn tab_range(sheet: Worksheet) -> String {
    quoted_title(sheet)
}

/// 1 -> A, 26 -> Z, 27 -> AA
fn column_letter(column: usize) -> Option<String> {
    if column == 0 {
        return None;
    }
    let mut n = column;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    Some(letters.into_iter().rev().collect())
}
