//! Image uploads to the platform's object storage.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult};
use crate::infra::ObjectStorage;
use domain::upload::object_name;
use domain::{ensure_public_url, ImageMeta};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// A file received from a multipart form
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub meta: ImageMeta,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: String, content_type: String, bytes: Vec<u8>) -> Self {
        Self {
            meta: ImageMeta {
                file_name,
                content_type,
                size: bytes.len() as u64,
            },
            bytes,
        }
    }
}

/// Stored image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UploadedImage {
    /// Public http(s) URL; the only value ever persisted on a record
    #[schema(example = "https://project.supabase.co/storage/v1/object/public/activity-images/1704067200000-1a2b3c4d.png")]
    pub url: String,
    /// Object path inside the bucket
    pub path: String,
    pub file_name: String,
    pub file_size: u64,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UploadService: Send + Sync {
    /// Validate, store and resolve an image. Nothing is sent to storage
    /// when the file fails validation.
    async fn upload_image(&self, access_token: &str, image: ImageUpload)
        -> AppResult<UploadedImage>;
}

pub struct ImageUploader {
    storage: Arc<dyn ObjectStorage>,
    bucket: String,
}

impl ImageUploader {
    pub fn new(storage: Arc<dyn ObjectStorage>, bucket: String) -> Self {
        Self { storage, bucket }
    }
}

#[async_trait]
impl UploadService for ImageUploader {
    async fn upload_image(
        &self,
        access_token: &str,
        image: ImageUpload,
    ) -> AppResult<UploadedImage> {
        let ImageUpload { meta, bytes } = image;
        meta.validate()?;

        let name = object_name(&meta, Utc::now());
        let path = self
            .storage
            .upload(access_token, &self.bucket, &name, bytes, &meta.content_type)
            .await
            .map_err(|e| {
                tracing::error!(bucket = %self.bucket, object = %name, error = %e, "Storage upload failed");
                AppError::Upload(e.to_string())
            })?;

        let url = self
            .storage
            .public_url(&self.bucket, &name)
            .map_err(|e| AppError::Upload(e.to_string()))?;
        ensure_public_url(&url)?;

        tracing::info!(object = %name, size = meta.size, "Image uploaded");

        Ok(UploadedImage {
            url,
            path,
            file_name: name,
            file_size: meta.size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockObjectStorage, PlatformError};

    fn png(size: usize) -> ImageUpload {
        ImageUpload::new("poster.PNG".into(), "image/png".into(), vec![0u8; size])
    }

    #[tokio::test]
    async fn test_oversized_file_never_reaches_storage() {
        let mut storage = MockObjectStorage::new();
        storage.expect_upload().never();

        let uploader = ImageUploader::new(Arc::new(storage), "activity-images".into());
        let err = uploader
            .upload_image("token", png(3 * 1024 * 1024))
            .await
            .unwrap_err();

        assert_eq!(err.field(), Some("image_file"));
        assert!(err.user_message().contains("3.00 MB"));
    }

    #[tokio::test]
    async fn test_wrong_type_lists_accepted_types() {
        let mut storage = MockObjectStorage::new();
        storage.expect_upload().never();

        let uploader = ImageUploader::new(Arc::new(storage), "activity-images".into());
        let image = ImageUpload::new("doc.pdf".into(), "application/pdf".into(), vec![1; 10]);
        let err = uploader.upload_image("token", image).await.unwrap_err();
        assert!(err.user_message().contains("JPEG, PNG, WebP, GIF"));
    }

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let mut storage = MockObjectStorage::new();
        storage
            .expect_upload()
            .withf(|_, bucket, name, bytes, ty| {
                bucket == "activity-images"
                    && name.ends_with(".png")
                    && bytes.len() == 1024
                    && ty == "image/png"
            })
            .returning(|_, bucket, name, _, _| Ok(format!("{}/{}", bucket, name)));
        storage.expect_public_url().returning(|bucket, name| {
            Ok(format!(
                "https://cdn.example.com/storage/v1/object/public/{}/{}",
                bucket, name
            ))
        });

        let uploader = ImageUploader::new(Arc::new(storage), "activity-images".into());
        let uploaded = uploader.upload_image("token", png(1024)).await.unwrap();

        assert!(uploaded.url.starts_with("https://"));
        assert_eq!(uploaded.file_size, 1024);
        assert!(uploaded.path.ends_with(&uploaded.file_name));
    }

    #[tokio::test]
    async fn test_storage_failure_is_upload_error() {
        let mut storage = MockObjectStorage::new();
        storage.expect_upload().returning(|_, _, _, _, _| {
            Err(PlatformError::Api {
                status: 400,
                message: "new row violates row-level security policy".into(),
            })
        });

        let uploader = ImageUploader::new(Arc::new(storage), "activity-images".into());
        let err = uploader.upload_image("token", png(10)).await.unwrap_err();
        assert!(matches!(err, AppError::Upload(_)));
    }
}
