//! Object storage capability: upload a named blob, resolve its public URL.

use async_trait::async_trait;
use reqwest::Method;

use super::{PlatformClient, PlatformResult};
use crate::config::{Config, PLATFORM_STORAGE_PATH, UPLOAD_CACHE_CONTROL_SECONDS};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `name`; returns the stored object path.
    async fn upload(
        &self,
        access_token: &str,
        bucket: &str,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> PlatformResult<String>;

    /// Public URL of an object in a public bucket
    fn public_url(&self, bucket: &str, name: &str) -> PlatformResult<String>;
}

/// `ObjectStorage` over the platform's REST storage API.
pub struct PlatformStorage {
    client: PlatformClient,
}

impl PlatformStorage {
    pub fn new(config: &Config) -> Self {
        Self {
            client: PlatformClient::new(config),
        }
    }
}

#[async_trait]
impl ObjectStorage for PlatformStorage {
    async fn upload(
        &self,
        access_token: &str,
        bucket: &str,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> PlatformResult<String> {
        let url = self
            .client
            .endpoint(&format!("{}/object/{}/{}", PLATFORM_STORAGE_PATH, bucket, name))?;

        let response = self
            .client
            .request(Method::POST, url, Some(access_token))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(
                reqwest::header::CACHE_CONTROL,
                format!("max-age={}", UPLOAD_CACHE_CONTROL_SECONDS),
            )
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        PlatformClient::check(response).await?;
        Ok(name.to_string())
    }

    fn public_url(&self, bucket: &str, name: &str) -> PlatformResult<String> {
        let url = self.client.endpoint(&format!(
            "{}/object/public/{}/{}",
            PLATFORM_STORAGE_PATH, bucket, name
        ))?;
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_layout() {
        let config = Config::from_lookup(|key| match key {
            "PLATFORM_URL" => Some("https://demo.example.co".to_string()),
            "PLATFORM_ANON_KEY" => Some("anon".to_string()),
            _ => None,
        })
        .unwrap();
        let storage = PlatformStorage::new(&config);
        assert_eq!(
            storage.public_url("activity-images", "1700-abcd.png").unwrap(),
            "https://demo.example.co/storage/v1/object/public/activity-images/1700-abcd.png"
        );
    }
}
