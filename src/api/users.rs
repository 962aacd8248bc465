//! Enquiry leads from the storefront signup form

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use super::extract::AppJson;
use crate::domain::aggregates::{LeadInput, LEAD_SHEET};
use crate::state::AppState;
use crate::Result;

pub async fn add_user(State(s): State<AppState>, AppJson(r): AppJson<LeadInput>) -> Result<(StatusCode, Json<serde_json::Value>)> {
    s.sheets.append(LEAD_SHEET, r.to_row(Utc::now())).await?;
    tracing::info!("Enquiry lead saved");
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "success": true }))))
}
