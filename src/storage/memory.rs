//! In-memory [`ObjectStore`] for tests

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{public_url, ObjectStore};
use crate::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    pub name: String,
    pub content_type: String,
    pub size: usize,
}

pub struct MemoryStore {
    bucket: String,
    objects: Mutex<Vec<StoredObject>>,
}

impl MemoryStore {
    pub fn new(bucket: impl Into<String>) -> Self { Self { bucket: bucket.into(), objects: Mutex::new(vec![]) } }

    pub async fn objects(&self) -> Vec<StoredObject> { self.objects.lock().await.clone() }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, name: &str, content_type: &str, bytes: Vec<u8>) -> Result<String> {
        self.objects.lock().await.push(StoredObject { name: name.to_string(), content_type: content_type.to_string(), size: bytes.len() });
        Ok(public_url(&self.bucket, name))
    }
}
