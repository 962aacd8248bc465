//! Product catalog endpoints
//!
//! Every call reads the whole `Products` sheet; filtering and paging happen
//! in memory. Updates and deletes locate the row by a linear scan over `id`
//! and then write by position in a second round trip.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::extract::AppJson;
use crate::auth::AdminIdentity;
use crate::domain::aggregates::product::header_matches;
use crate::domain::aggregates::{Product, ProductInput, ProductPatch, PRODUCT_SHEET};
use crate::domain::value_objects::SheetTable;
use crate::state::AppState;
use crate::{CatalogError, Result};

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    #[serde(alias = "perPage")]
    pub per_page: Option<u32>,
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub per_page: u32,
}

/// Plain array unless the client asked for a page.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ProductListing {
    All(Vec<Product>),
    Page(PaginatedResponse<Product>),
}

async fn read_products(s: &AppState) -> Result<SheetTable> {
    let table = s.sheets.read(PRODUCT_SHEET).await?;
    if !table.header().is_empty() && !header_matches(table.header()) {
        tracing::warn!(header = ?table.header(), "Products header differs from the expected column layout");
    }
    Ok(table)
}

fn non_blank(value: &Option<String>) -> Option<&str> { value.as_deref().map(str::trim).filter(|v| !v.is_empty()) }

pub async fn list_products(State(s): State<AppState>, Query(p): Query<ListParams>) -> Result<Json<ProductListing>> {
    let table = read_products(&s).await?;
    let (category, search) = (non_blank(&p.category), non_blank(&p.search));
    let products: Vec<Product> = table.records().iter().map(Product::from_row).filter(|product| product.matches(category, search)).collect();
    tracing::info!(count = products.len(), "Fetched products");

    if p.page.is_none() && p.per_page.is_none() {
        return Ok(Json(ProductListing::All(products)));
    }
    let page = p.page.unwrap_or(1).max(1);
    let per_page = p.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
    let total = products.len();
    let data = products.into_iter().skip((page as usize - 1) * per_page as usize).take(per_page as usize).collect();
    Ok(Json(ProductListing::Page(PaginatedResponse { data, total, page, per_page })))
}

pub async fn create_product(
    State(s): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    AppJson(r): AppJson<ProductInput>,
) -> Result<(StatusCode, Json<Product>)> {
    r.validate()?;
    let product = Product::create(Utc::now().timestamp_millis().to_string(), r);
    s.sheets.append(PRODUCT_SHEET, product.to_row()).await?;
    tracing::info!(product_id = %product.id, admin = %admin.username, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(s): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    Path(id): Path<String>,
    AppJson(patch): AppJson<ProductPatch>,
) -> Result<Json<Product>> {
    let table = read_products(&s).await?;
    let Some((index, record)) = table.position("id", id.trim()) else {
        tracing::info!(product_id = %id, "Product not found");
        return Err(CatalogError::NotFound("Product"));
    };

    let mut product = Product::from_row(&record);
    product.apply(patch);
    // `index` is from the read above; a concurrent insert/delete can make it stale.
    s.sheets.update(PRODUCT_SHEET, index, product.to_row()).await?;
    tracing::info!(product_id = %product.id, row = %index, admin = %admin.username, "Product updated");
    Ok(Json(product))
}

pub async fn delete_product(
    State(s): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let table = read_products(&s).await?;
    let (index, _) = table.position("id", id.trim()).ok_or(CatalogError::NotFound("Product"))?;
    // Same staleness caveat as update.
    s.sheets.delete(PRODUCT_SHEET, index).await?;
    tracing::info!(product_id = %id, row = %index, admin = %admin.username, "Product deleted");
    Ok(Json(serde_json::json!({ "success": true })))
}
