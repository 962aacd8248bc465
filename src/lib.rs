//! Wholesale Catalog Backend
//!
//! HTTP backend for a wholesale storefront that keeps its data in a Google
//! Sheets spreadsheet and its product images in a Cloud Storage bucket.
//!
//! ## Features
//! - Product catalog CRUD with row/object reconciliation
//! - Admin login with signed bearer tokens
//! - Visitor counter, enquiry leads and contact requests
//! - Image uploads to object storage

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod google;
pub mod sheets;
pub mod state;
pub mod storage;

use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

pub use config::Config;
pub use state::AppState;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::SheetNotFound(_) | Self::Upstream(_) | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        Self::Upstream(e.to_string())
    }
}

impl From<axum::extract::rejection::JsonRejection> for CatalogError {
    fn from(e: axum::extract::rejection::JsonRejection) -> Self {
        Self::Validation(e.body_text())
    }
}

impl From<validator::ValidationErrors> for CatalogError {
    fn from(e: validator::ValidationErrors) -> Self {
        Self::Validation(e.to_string())
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            serde_json::json!({ "error": "Upstream request failed", "details": self.to_string() })
        } else {
            serde_json::json!({ "error": self.to_string() })
        };
        (status, Json(body)).into_response()
    }
}
