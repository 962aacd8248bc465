//! Google Sheets REST v4 implementation of [`SheetStore`]

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::json;

use super::SheetStore;
use crate::domain::value_objects::{RowIndex, SheetTable};
use crate::google::{check, GoogleAuth};
use crate::{CatalogError, Result};

pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";

/// Cells fetched by a full-sheet read.
const READ_CELLS: &str = "A1:Z1000";

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Deserialize)]
struct Spreadsheet {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    #[serde(default)]
    sheet_id: i64,
    #[serde(default)]
    title: String,
}

pub struct GoogleSheets {
    http: reqwest::Client,
    auth: Arc<GoogleAuth>,
    spreadsheet_id: String,
    base_url: String,
}

impl GoogleSheets {
    pub fn new(http: reqwest::Client, auth: Arc<GoogleAuth>, spreadsheet_id: impl Into<String>) -> Self {
        Self { http, auth, spreadsheet_id: spreadsheet_id.into(), base_url: SHEETS_BASE_URL.to_string() }
    }

    fn url(&self, tail: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| CatalogError::Internal(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| CatalogError::Internal(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets"])
            .extend(tail);
        Ok(url)
    }

    async fn sheet_id(&self, sheet: &str) -> Result<i64> {
        let url = self.url(&[self.spreadsheet_id.as_str()])?;
        let response = self
            .http
            .get(url)
            .query(&[("fields", "sheets.properties(sheetId,title)")])
            .bearer_auth(self.auth.access_token().await?)
            .send()
            .await?;
        let spreadsheet: Spreadsheet = check(response, "spreadsheets.get").await?.json().await?;
        spreadsheet
            .sheets
            .into_iter()
            .find(|s| s.properties.title == sheet)
            .map(|s| s.properties.sheet_id)
            .ok_or_else(|| CatalogError::SheetNotFound(sheet.to_string()))
    }
}

/// A1 range for `cells` on `sheet`, quoting names that need it.
pub(crate) fn a1_range(sheet: &str, cells: &str) -> String {
    if sheet.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        format!("{sheet}!{cells}")
    } else {
        format!("'{}'!{cells}", sheet.replace('\'', "''"))
    }
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl SheetStore for GoogleSheets {
    async fn read(&self, sheet: &str) -> Result<SheetTable> {
        tracing::debug!(sheet, "Fetching sheet");
        let url = self.url(&[self.spreadsheet_id.as_str(), "values", a1_range(sheet, READ_CELLS).as_str()])?;
        let response = self.http.get(url).bearer_auth(self.auth.access_token().await?).send().await?;
        let range: ValueRange = check(response, "values.get").await?.json().await?;

        let values: Vec<Vec<String>> = range.values.into_iter().map(|row| row.into_iter().map(cell_text).collect()).collect();
        tracing::debug!(sheet, rows = values.len(), "Fetched sheet");
        Ok(SheetTable::from_values(values))
    }

    async fn append(&self, sheet: &str, row: Vec<String>) -> Result<()> {
        let url = self.url(&[self.spreadsheet_id.as_str(), "values", format!("{}:append", a1_range(sheet, "A1")).as_str()])?;
        let response = self
            .http
            .post(url)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .bearer_auth(self.auth.access_token().await?)
            .json(&json!({ "values": [row] }))
            .send()
            .await?;
        check(response, "values.append").await?;
        Ok(())
    }

    async fn update(&self, sheet: &str, index: RowIndex, row: Vec<String>) -> Result<()> {
        let cell = format!("A{}", index.a1_row());
        let url = self.url(&[self.spreadsheet_id.as_str(), "values", a1_range(sheet, &cell).as_str()])?;
        let response = self
            .http
            .put(url)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .bearer_auth(self.auth.access_token().await?)
            .json(&json!({ "values": [row] }))
            .send()
            .await?;
        check(response, "values.update").await?;
        Ok(())
    }

    async fn delete(&self, sheet: &str, index: RowIndex) -> Result<()> {
        let sheet_id = self.sheet_id(sheet).await?;
        let url = self.url(&[format!("{}:batchUpdate", self.spreadsheet_id).as_str()])?;
        let body = json!({
            "requests": [{
                "deleteDimension": {
                    "range": {
                        "sheetId": sheet_id,
                        "dimension": "ROWS",
                        "startIndex": index.value(),
                        "endIndex": index.value() + 1,
                    }
                }
            }]
        });
        let response = self.http.post(url).bearer_auth(self.auth.access_token().await?).json(&body).send().await?;
        check(response, "batchUpdate").await?;
        Ok(())
    }
}
