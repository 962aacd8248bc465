//! Cloud Storage JSON API upload

use std::sync::Arc;

use async_trait::async_trait;

use super::{public_url, ObjectStore};
use crate::google::{check, GoogleAuth};
use crate::Result;

pub const UPLOAD_BASE_URL: &str = "https://storage.googleapis.com/upload/storage/v1/b";

pub struct GcsStore {
    http: reqwest::Client,
    auth: Arc<GoogleAuth>,
    bucket: String,
}

impl GcsStore {
    pub fn new(http: reqwest::Client, auth: Arc<GoogleAuth>, bucket: impl Into<String>) -> Self {
        Self { http, auth, bucket: bucket.into() }
    }

    pub fn bucket(&self) -> &str { &self.bucket }
}

#[async_trait]
impl ObjectStore for GcsStore {
    async fn put(&self, name: &str, content_type: &str, bytes: Vec<u8>) -> Result<String> {
        let size = bytes.len();
        let response = self
            .http
            .post(format!("{UPLOAD_BASE_URL}/{}/o", self.bucket))
            .query(&[("uploadType", "media"), ("name", name), ("predefinedAcl", "publicRead")])
            .bearer_auth(self.auth.access_token().await?)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        check(response, "objects.insert").await?;

        tracing::info!(bucket = %self.bucket, object = name, size, "Image uploaded");
        Ok(public_url(&self.bucket, name))
    }
}
