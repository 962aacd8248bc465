//! Product image uploads
//!
//! POST /api/upload/image: multipart field `image`, one file
//! POST /api/upload/images: multipart field `images`, up to 5 files
//!
//! Objects are stored as `products/<uuid><ext>` and served from their public URL.

use axum::{extract::Multipart, extract::State, Extension, Json};
use futures::future::try_join_all;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AdminIdentity;
use crate::state::AppState;
use crate::storage::ObjectStore;
use crate::{CatalogError, Result};

/// Maximum size of one image (5MB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Maximum files per batch upload
pub const MAX_BATCH: usize = 5;

/// Request body limit for upload routes
pub const UPLOAD_BODY_LIMIT: usize = MAX_BATCH * MAX_IMAGE_BYTES + 1024 * 1024;

const OBJECT_PREFIX: &str = "products";

#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn validate(&self) -> Result<()> {
        if !self.content_type.starts_with("image/") {
            return Err(CatalogError::Validation(format!("Only image files are allowed: {}", self.file_name)));
        }
        if self.bytes.is_empty() {
            return Err(CatalogError::Validation(format!("Empty file: {}", self.file_name)));
        }
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(CatalogError::Validation(format!(
                "File too large: {} is {} bytes (max {MAX_IMAGE_BYTES})",
                self.file_name,
                self.bytes.len()
            )));
        }
        Ok(())
    }

    /// Unique object name keeping the original extension.
    pub fn object_name(&self) -> String {
        let ext = std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default();
        format!("{OBJECT_PREFIX}/{}{ext}", Uuid::new_v4())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
    pub file_name: String,
}

#[derive(Debug, Serialize)]
pub struct BatchUploadResponse {
    pub success: bool,
    pub urls: Vec<String>,
}

/// Reads every file sent under the multipart field `field`.
async fn collect_files(multipart: &mut Multipart, field: &str) -> Result<Vec<ImageFile>> {
    let mut files = Vec::new();
    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| CatalogError::Validation(format!("Multipart error: {e}")))?
    {
        if part.name() != Some(field) {
            continue;
        }
        let file_name = part.file_name().unwrap_or_default().to_string();
        let content_type = part.content_type().unwrap_or_default().to_string();
        let bytes = part
            .bytes()
            .await
            .map_err(|e| CatalogError::Validation(format!("Read error: {e}")))?
            .to_vec();
        files.push(ImageFile { file_name, content_type, bytes });
    }
    Ok(files)
}

/// Uploads one validated file and returns `(public url, object name)`.
pub async fn store_image(storage: &dyn ObjectStore, file: ImageFile) -> Result<(String, String)> {
    file.validate()?;
    let name = file.object_name();
    let url = storage.put(&name, &file.content_type, file.bytes).await?;
    Ok((url, name))
}

/// Uploads a batch concurrently. Every file is validated before any upload
/// starts; the first upload failure fails the whole batch.
pub async fn store_images(storage: &dyn ObjectStore, files: Vec<ImageFile>) -> Result<Vec<String>> {
    if files.len() > MAX_BATCH {
        return Err(CatalogError::Validation(format!("At most {MAX_BATCH} images per upload")));
    }
    files.iter().try_for_each(ImageFile::validate)?;
    let stored = try_join_all(files.into_iter().map(|f| store_image(storage, f))).await?;
    Ok(stored.into_iter().map(|(url, _)| url).collect())
}

pub async fn upload_image(
    State(s): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let file = collect_files(&mut multipart, "image")
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| CatalogError::Validation("No image file provided".into()))?;

    let (url, file_name) = store_image(s.storage.as_ref(), file).await?;
    tracing::info!(admin = %admin.username, object = %file_name, "Image uploaded");
    Ok(Json(UploadResponse { success: true, url, file_name }))
}

pub async fn upload_images(
    State(s): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    mut multipart: Multipart,
) -> Result<Json<BatchUploadResponse>> {
    let files = collect_files(&mut multipart, "images").await?;
    if files.is_empty() {
        return Err(CatalogError::Validation("No image files provided".into()));
    }

    let urls = store_images(s.storage.as_ref(), files).await?;
    tracing::info!(admin = %admin.username, count = urls.len(), "Images uploaded");
    Ok(Json(BatchUploadResponse { success: true, urls }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn png(name: &str, size: usize) -> ImageFile {
        ImageFile { file_name: name.into(), content_type: "image/png".into(), bytes: vec![7; size] }
    }

    #[test]
    fn test_object_name_keeps_extension() {
        let name = png("Front View.PNG", 1).object_name();
        assert!(name.starts_with("products/"));
        assert!(name.ends_with(".png"));
        assert_ne!(name, png("Front View.PNG", 1).object_name());
        assert!(!png("noext", 1).object_name().contains('.'));
    }

    #[test]
    fn test_validate() {
        assert!(png("a.png", 10).validate().is_ok());
        assert!(png("a.png", 0).validate().is_err());
        assert!(png("a.png", MAX_IMAGE_BYTES + 1).validate().is_err());
        let pdf = ImageFile { content_type: "application/pdf".into(), ..png("a.pdf", 10) };
        assert!(matches!(pdf.validate(), Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_store_images() {
        let store = MemoryStore::new("bucket");
        let urls = store_images(&store, vec![png("a.png", 3), png("b.jpg", 4)]).await.unwrap();
        assert_eq!(urls.len(), 2);
        assert!(urls.iter().all(|u| u.starts_with("https://storage.googleapis.com/bucket/products/")));
        assert_eq!(store.objects().await.len(), 2);
    }

    #[tokio::test]
    async fn test_batch_is_all_or_nothing() {
        let store = MemoryStore::new("bucket");
        let bad = ImageFile { content_type: "text/plain".into(), ..png("notes.txt", 3) };
        assert!(store_images(&store, vec![png("a.png", 3), bad]).await.is_err());
        assert!(store.objects().await.is_empty());
    }

    #[tokio::test]
    async fn test_batch_limit() {
        let store = MemoryStore::new("bucket");
        let files = (0..6).map(|i| png(&format!("{i}.png"), 1)).collect();
        assert!(store_images(&store, files).await.is_err());
    }
}
