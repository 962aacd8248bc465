//! Object storage for product images

mod gcs;
mod memory;

pub use gcs::GcsStore;
pub use memory::{MemoryStore, StoredObject};

use async_trait::async_trait;

use crate::Result;

pub const PUBLIC_BASE_URL: &str = "https://storage.googleapis.com";

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `bytes` under `name` as a publicly readable object and returns its public URL.
    async fn put(&self, name: &str, content_type: &str, bytes: Vec<u8>) -> Result<String>;
}

pub fn public_url(bucket: &str, name: &str) -> String { format!("{PUBLIC_BASE_URL}/{bucket}/{name}") }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url() {
        assert_eq!(
            public_url("wholesale-product-images", "products/a.jpg"),
            "https://storage.googleapis.com/wholesale-product-images/products/a.jpg"
        );
    }
}
