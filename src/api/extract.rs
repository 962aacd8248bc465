//! Request body extractors that reject through [`CatalogError`]

use axum::extract::FromRequest;

use crate::CatalogError;

/// `axum::Json` whose rejections (bad syntax, wrong types, missing
/// content type) become a 400 with the JSON error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(CatalogError))]
pub struct AppJson<T>(pub T);
