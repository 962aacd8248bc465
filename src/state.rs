//! Application state shared by all handlers

use std::sync::Arc;

use crate::config::Config;
use crate::google::{GoogleAuth, ServiceAccountKey};
use crate::sheets::{GoogleSheets, SheetStore};
use crate::storage::{GcsStore, ObjectStore};
use crate::Result;

#[derive(Clone)]
pub struct AppState {
    /// Spreadsheet acting as the database
    pub sheets: Arc<dyn SheetStore>,
    /// Image bucket
    pub storage: Arc<dyn ObjectStore>,
    /// Secret for admin tokens
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(sheets: Arc<dyn SheetStore>, storage: Arc<dyn ObjectStore>, jwt_secret: &str) -> Self {
        Self { sheets, storage, jwt_secret: Arc::from(jwt_secret) }
    }

    /// Builds the Google-backed clients. One access token is shared by the sheet and bucket clients.
    pub fn connect(config: &Config) -> Result<Self> {
        let http = reqwest::Client::new();
        let key = ServiceAccountKey::from_json(&config.service_account_json)?;
        let auth = Arc::new(GoogleAuth::new(http.clone(), key)?);
        tracing::info!(client_email = auth.client_email(), "Google service account loaded");

        let sheets = GoogleSheets::new(http.clone(), auth.clone(), &config.spreadsheet_id);
        let storage = GcsStore::new(http, auth, &config.bucket);
        tracing::info!(bucket = storage.bucket(), "Image bucket configured");

        Ok(Self::new(Arc::new(sheets), Arc::new(storage), &config.jwt_secret))
    }
}
