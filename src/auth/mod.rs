//! Admin bearer tokens
//!
//! Tokens are HS256-signed with the configured secret and carry only the
//! admin username. Verification checks signature and expiry; there is no
//! revocation list.

pub mod password;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::{CatalogError, Result};

pub use password::{hash_password, verify_password};

pub const TOKEN_TTL_HOURS: i64 = 12;

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Admin username
    pub sub: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated admin, inserted into request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub username: String,
}

pub fn create_token(username: &str, secret: &str) -> Result<String> {
    let now = chrono::Utc::now();
    let claims = AdminClaims {
        sub: username.to_string(),
        exp: (now + chrono::Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };
    jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| CatalogError::Internal(format!("Failed to sign token: {e}")))
}

pub fn verify_token(token: &str, secret: &str) -> Result<AdminClaims> {
    jsonwebtoken::decode::<AdminClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!("Token validation failed: {e}");
            CatalogError::Unauthorized("Invalid token")
        })
}

/// Rejects requests without a valid `Authorization: Bearer <token>` header.
pub async fn require_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let header = match request.headers().get(AUTHORIZATION) {
        Some(value) => value.to_str().unwrap_or_default().trim().to_string(),
        None => return CatalogError::Unauthorized("No token").into_response(),
    };
    let token = header.strip_prefix("Bearer ").unwrap_or_default().trim();

    match verify_token(token, &state.jwt_secret) {
        Ok(claims) => {
            request.extensions_mut().insert(AdminIdentity { username: claims.sub });
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let token = create_token("owner", "secret").unwrap();
        let claims = verify_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, "owner");
        assert_eq!(claims.exp - claims.iat, (TOKEN_TTL_HOURS * 3600) as usize);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("owner", "secret").unwrap();
        assert!(matches!(verify_token(&token, "other"), Err(CatalogError::Unauthorized(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let past = chrono::Utc::now() - chrono::Duration::hours(2);
        let claims = AdminClaims {
            sub: "owner".into(),
            exp: (past + chrono::Duration::minutes(30)).timestamp() as usize,
            iat: past.timestamp() as usize,
        };
        let token = jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(b"secret")).unwrap();
        assert!(verify_token(&token, "secret").is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(verify_token("not-a-token", "secret").is_err());
        assert!(verify_token("", "secret").is_err());
    }
}
