//! Contact requests from the storefront contact page

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use validator::Validate;

use super::extract::AppJson;
use crate::domain::aggregates::{Contact, ContactInput, CONTACT_SHEET};
use crate::domain::value_objects::SheetRecord;
use crate::state::AppState;
use crate::Result;

pub async fn add_contact(State(s): State<AppState>, AppJson(r): AppJson<ContactInput>) -> Result<(StatusCode, Json<serde_json::Value>)> {
    r.validate()?;
    let contact = Contact::record(r, Utc::now());
    s.sheets.append(CONTACT_SHEET, contact.to_row()).await?;
    tracing::info!(contact_id = %contact.id, "Contact saved");
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "message": "Contact information saved successfully" })),
    ))
}

pub async fn list_contacts(State(s): State<AppState>) -> Result<Json<Vec<SheetRecord>>> {
    let table = s.sheets.read(CONTACT_SHEET).await?;
    Ok(Json(table.records()))
}
