//! Image upload rules: validation before any network call, collision-resistant
//! object names, and the guard that keeps non-URL image data out of the tables.

use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

use crate::constants::{ALLOWED_IMAGE_TYPES, MAX_IMAGE_BYTES, OBJECT_NAME_SUFFIX_LENGTH};
use crate::error::{DomainError, DomainResult};

/// Metadata of a selected image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMeta {
    pub file_name: String,
    pub content_type: String,
    pub size: u64,
}

impl ImageMeta {
    /// Check size and MIME type, naming the violated constraint.
    pub fn validate(&self) -> DomainResult<()> {
        if self.size == 0 {
            return Err(DomainError::validation("image_file", "The selected file is empty"));
        }
        if self.size > MAX_IMAGE_BYTES {
            return Err(DomainError::validation(
                "image_file",
                format!(
                    "File is too large ({:.2} MB). Maximum size is {} MB",
                    bytes_to_mb(self.size),
                    MAX_IMAGE_BYTES / (1024 * 1024)
                ),
            ));
        }

        let content_type = self.content_type.to_ascii_lowercase();
        if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
            return Err(DomainError::validation(
                "image_file",
                format!(
                    "Unsupported file type '{}'. Accepted types: JPEG, PNG, WebP, GIF",
                    self.content_type
                ),
            ));
        }
        Ok(())
    }

    /// Lowercased extension from the original file name, falling back to the MIME type.
    pub fn extension(&self) -> String {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.trim().to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or_else(|| {
                match self.content_type.to_ascii_lowercase().as_str() {
                    "image/png" => "png",
                    "image/webp" => "webp",
                    "image/gif" => "gif",
                    _ => "jpg",
                }
                .to_string()
            })
    }
}

fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

/// Object name of the form `{unix_millis}-{random}.{ext}`.
pub fn object_name(meta: &ImageMeta, now: DateTime<Utc>) -> String {
    let random = Uuid::new_v4().simple().to_string();
    object_name_with_suffix(meta, now, &random[..OBJECT_NAME_SUFFIX_LENGTH])
}

pub fn object_name_with_suffix(meta: &ImageMeta, now: DateTime<Utc>, suffix: &str) -> String {
    format!("{}-{}.{}", now.timestamp_millis(), suffix, meta.extension())
}

/// Refuse anything but an http(s) URL as a persisted image reference.
pub fn ensure_public_url(url: &str) -> DomainResult<()> {
    let trimmed = url.trim();
    if trimmed.starts_with("data:") || trimmed.contains(";base64,") {
        return Err(DomainError::validation(
            "image_url",
            "Inline image data cannot be stored; upload the file first",
        ));
    }
    ensure_http_url("image_url", trimmed)
}

/// Check that `value` parses as an absolute http or https URL.
pub fn ensure_http_url(field: &'static str, value: &str) -> DomainResult<()> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => Ok(()),
        _ => Err(DomainError::validation(
            field,
            "Must be a valid http(s) URL",
        )),
    }
}
