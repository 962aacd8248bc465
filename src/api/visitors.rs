//! Visitor counter endpoints

use axum::{extract::State, Json};
use chrono::Utc;

use crate::domain::aggregates::{visit_row, VisitorCount, VISITOR_SHEET};
use crate::state::AppState;
use crate::Result;

pub async fn visitor_count(State(s): State<AppState>) -> Result<Json<VisitorCount>> {
    let table = s.sheets.read(VISITOR_SHEET).await?;
    Ok(Json(VisitorCount { count: table.len() }))
}

/// Records a visit, then re-reads the sheet for the new count.
pub async fn record_visit(State(s): State<AppState>) -> Result<Json<VisitorCount>> {
    s.sheets.append(VISITOR_SHEET, visit_row(Utc::now())).await?;
    let table = s.sheets.read(VISITOR_SHEET).await?;
    tracing::debug!(count = table.len(), "Visit recorded");
    Ok(Json(VisitorCount { count: table.len() }))
}
