//! Admin login

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::extract::AppJson;
use crate::auth::{create_token, verify_password};
use crate::domain::aggregates::{AdminCredential, ADMIN_SHEET};
use crate::state::AppState;
use crate::{CatalogError, Result};

#[derive(Debug, Default, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

pub async fn login(State(s): State<AppState>, AppJson(r): AppJson<LoginRequest>) -> Result<Response> {
    if r.validate().is_err() || r.username.trim().is_empty() {
        return Err(CatalogError::Validation("Missing credentials".into()));
    }

    let table = s.sheets.read(ADMIN_SHEET).await?;
    let credential = AdminCredential::find(&table.records(), &r.username);
    let verified = credential.as_ref().is_some_and(|c| verify_password(&r.password, &c.password_hash));
    if !verified {
        tracing::warn!(username = %r.username.trim(), "Admin login rejected");
        let body = LoginResponse { success: false, token: None, message: Some("Invalid credentials") };
        return Ok((StatusCode::UNAUTHORIZED, Json(body)).into_response());
    }

    let username = r.username.trim();
    let token = create_token(username, &s.jwt_secret)?;
    tracing::info!(username, "Admin logged in");
    Ok(Json(LoginResponse { success: true, token: Some(token), message: None }).into_response())
}
