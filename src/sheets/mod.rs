//! Row-level access to the spreadsheet that backs the catalog
//!
//! Every sheet is a table whose first row is the header. Row indexes count
//! the header as row 0, so the first data row is [`RowIndex::of_data`]`(0)`.

mod google;
mod memory;

pub use google::GoogleSheets;
pub use memory::MemorySheets;

use async_trait::async_trait;

use crate::domain::value_objects::{RowIndex, SheetTable};
use crate::Result;

#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Reads the whole sheet, header included.
    async fn read(&self, sheet: &str) -> Result<SheetTable>;

    /// Appends one row after the last data row.
    async fn append(&self, sheet: &str, row: Vec<String>) -> Result<()>;

    /// Overwrites the row at `index`.
    async fn update(&self, sheet: &str, index: RowIndex, row: Vec<String>) -> Result<()>;

    /// Removes the row at `index`, shifting later rows up.
    async fn delete(&self, sheet: &str, index: RowIndex) -> Result<()>;
}
