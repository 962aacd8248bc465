//! In-memory [`SheetStore`] used by tests and local runs without Google credentials

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::SheetStore;
use crate::domain::value_objects::{RowIndex, SheetTable};
use crate::{CatalogError, Result};

#[derive(Default)]
pub struct MemorySheets {
    sheets: RwLock<HashMap<String, Vec<Vec<String>>>>,
}

impl MemorySheets {
    pub fn new() -> Self { Self::default() }

    /// Adds a sheet with the given header row.
    pub fn with_sheet<S: AsRef<str>>(mut self, name: &str, header: &[S]) -> Self {
        let header = header.iter().map(|h| h.as_ref().to_string()).collect();
        self.sheets.get_mut().insert(name.to_string(), vec![header]);
        self
    }

    /// Raw rows of a sheet, header first.
    pub async fn rows(&self, sheet: &str) -> Vec<Vec<String>> {
        self.sheets.read().await.get(sheet).cloned().unwrap_or_default()
    }
}

fn missing(sheet: &str) -> CatalogError { CatalogError::SheetNotFound(sheet.to_string()) }

#[async_trait]
impl SheetStore for MemorySheets {
    async fn read(&self, sheet: &str) -> Result<SheetTable> {
        let sheets = self.sheets.read().await;
        let rows = sheets.get(sheet).ok_or_else(|| missing(sheet))?;
        Ok(SheetTable::from_values(rows.clone()))
    }

    async fn append(&self, sheet: &str, row: Vec<String>) -> Result<()> {
        let mut sheets = self.sheets.write().await;
        sheets.get_mut(sheet).ok_or_else(|| missing(sheet))?.push(row);
        Ok(())
    }

    async fn update(&self, sheet: &str, index: RowIndex, row: Vec<String>) -> Result<()> {
        let mut sheets = self.sheets.write().await;
        let rows = sheets.get_mut(sheet).ok_or_else(|| missing(sheet))?;
        if rows.len() <= index.value() {
            rows.resize(index.value() + 1, Vec::new());
        }
        rows[index.value()] = row;
        Ok(())
    }

    async fn delete(&self, sheet: &str, index: RowIndex) -> Result<()> {
        let mut sheets = self.sheets.write().await;
        let rows = sheets.get_mut(sheet).ok_or_else(|| missing(sheet))?;
        if index.value() >= rows.len() {
            return Err(CatalogError::Upstream(format!("Row {index} is out of range for sheet '{sheet}'")));
        }
        rows.remove(index.value());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> { cells.iter().map(|c| c.to_string()).collect() }

    #[tokio::test]
    async fn test_append_update_delete() {
        let store = MemorySheets::new().with_sheet("Products", &["id", "name"]);
        store.append("Products", row(&["1", "Tee"])).await.unwrap();
        store.append("Products", row(&["2", "Polo"])).await.unwrap();

        store.update("Products", RowIndex::of_data(1), row(&["2", "Polo Plus"])).await.unwrap();
        let table = store.read("Products").await.unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].get("name"), Some("Polo Plus"));

        store.delete("Products", RowIndex::of_data(0)).await.unwrap();
        assert_eq!(store.rows("Products").await, vec![row(&["id", "name"]), row(&["2", "Polo Plus"])]);
    }

    #[tokio::test]
    async fn test_missing_sheet() {
        let store = MemorySheets::new();
        assert!(matches!(store.read("Nope").await, Err(CatalogError::SheetNotFound(_))));
        assert!(store.append("Nope", vec![]).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_out_of_range() {
        let store = MemorySheets::new().with_sheet("Visitors", &["timestamp"]);
        assert!(store.delete("Visitors", RowIndex::new(3)).await.is_err());
    }
}
