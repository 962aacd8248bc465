//! Server configuration, read from the environment (and `.env` via dotenvy)

use crate::{CatalogError, Result};

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_BUCKET: &str = "wholesale-product-images";
const DEV_JWT_SECRET: &str = "changeme";

/// Origins always allowed by CORS (local dev servers).
pub const DEV_ORIGINS: [&str; 3] = ["http://localhost:5173", "http://localhost:3000", "http://localhost:4000"];

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP port
    pub port: u16,
    /// Spreadsheet id (env: GOOGLE_SHEET_ID)
    pub spreadsheet_id: String,
    /// Service account key JSON (env: GOOGLE_SERVICE_ACCOUNT_JSON)
    pub service_account_json: String,
    /// Secret for admin tokens (env: JWT_SECRET)
    pub jwt_secret: String,
    /// Image bucket (env: GOOGLE_CLOUD_BUCKET)
    pub bucket: String,
    /// CORS allowlist; FRONTEND_URL is appended to the dev origins
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |name: &str| var(name).ok_or_else(|| CatalogError::Config(format!("Missing required env var: {name}")));

        let jwt_secret = var("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set, using the development secret");
            DEV_JWT_SECRET.to_string()
        });

        let mut allowed_origins: Vec<String> = DEV_ORIGINS.iter().map(|o| o.to_string()).collect();
        allowed_origins.extend(var("FRONTEND_URL"));

        Ok(Self {
            port: match var("PORT") {
                Some(p) => p.parse().map_err(|_| CatalogError::Config(format!("PORT is not a valid port: {p}")))?,
                None => DEFAULT_PORT,
            },
            spreadsheet_id: require("GOOGLE_SHEET_ID")?,
            service_account_json: require("GOOGLE_SERVICE_ACCOUNT_JSON")?,
            jwt_secret,
            bucket: var("GOOGLE_CLOUD_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            allowed_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let c = config(&[("GOOGLE_SHEET_ID", "sheet"), ("GOOGLE_SERVICE_ACCOUNT_JSON", "{}")]).unwrap();
        assert_eq!(c.port, DEFAULT_PORT);
        assert_eq!(c.bucket, DEFAULT_BUCKET);
        assert_eq!(c.jwt_secret, "changeme");
        assert_eq!(c.allowed_origins.len(), 3);
    }

    #[test]
    fn test_frontend_url_extends_origins() {
        let c = config(&[
            ("GOOGLE_SHEET_ID", "sheet"),
            ("GOOGLE_SERVICE_ACCOUNT_JSON", "{}"),
            ("FRONTEND_URL", "https://shop.example"),
            ("PORT", "8080"),
        ])
        .unwrap();
        assert_eq!(c.port, 8080);
        assert_eq!(c.allowed_origins.last().map(String::as_str), Some("https://shop.example"));
    }

    #[test]
    fn test_missing_sheet_id() {
        let err = config(&[("GOOGLE_SERVICE_ACCOUNT_JSON", "{}")]).unwrap_err();
        assert!(err.to_string().contains("GOOGLE_SHEET_ID"));
    }

    #[test]
    fn test_bad_port() {
        assert!(config(&[("GOOGLE_SHEET_ID", "s"), ("GOOGLE_SERVICE_ACCOUNT_JSON", "{}"), ("PORT", "http")]).is_err());
    }
}
