//! Shared plumbing for Google REST APIs

pub mod auth;

pub use auth::{GoogleAuth, ServiceAccountKey};

use crate::{CatalogError, Result};

/// Passes successful responses through; turns error statuses into
/// `CatalogError::Upstream` carrying the API's error body.
pub(crate) async fn check(response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(%status, action, "Google API call failed");
    Err(CatalogError::Upstream(format!("{action} failed with {status}: {}", body.trim())))
}
