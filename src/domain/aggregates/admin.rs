//! Admin credentials read from the `Admin` sheet

use crate::domain::value_objects::SheetRecord;

pub const ADMIN_SHEET: &str = "Admin";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminCredential {
    pub username: String,
    pub password_hash: String,
}

impl AdminCredential {
    /// Reads a credential row. `password` is accepted as the hash column for older sheets.
    pub fn from_record(record: &SheetRecord) -> Self {
        Self {
            username: record.text("username").trim().to_string(),
            password_hash: record.get("passwordHash").or_else(|| record.get("password")).unwrap_or_default().trim().to_string(),
        }
    }

    /// First credential whose trimmed username equals `username`.
    pub fn find(records: &[SheetRecord], username: &str) -> Option<Self> {
        let username = username.trim();
        records.iter().map(Self::from_record).find(|c| !c.username.is_empty() && c.username == username)
    }
}
