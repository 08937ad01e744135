//! Backend platform clients.
//!
//! The hosted platform provides identity and object storage over REST.
//! Both capabilities sit behind traits so services receive them explicitly
//! and tests can substitute fakes.

mod identity;
mod storage;

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::config::{Config, PLATFORM_APIKEY_HEADER};

pub use identity::{IdentityProvider, PlatformIdentity};
pub use storage::{ObjectStorage, PlatformStorage};

#[cfg(any(test, feature = "test-utils"))]
pub use identity::MockIdentityProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use storage::MockObjectStorage;

/// Errors raised while talking to the platform.
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("platform request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("platform returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid platform url: {0}")]
    Url(#[from] url::ParseError),

    #[error("unexpected platform response: {0}")]
    Decode(String),
}

impl PlatformError {
    /// The platform refused the presented token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, PlatformError::Api { status: 401 | 403, .. })
    }
}

pub type PlatformResult<T> = Result<T, PlatformError>;

/// Identity record as returned by the platform.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdentityUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_confirmed_at: Option<DateTime<Utc>>,
}

/// Authenticated session issued by the platform.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    pub user: IdentityUser,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Shared HTTP plumbing: base URL, public key header and error decoding.
#[derive(Clone)]
pub(crate) struct PlatformClient {
    http: Client,
    base: Url,
    anon_key: String,
}

impl PlatformClient {
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            base: config.platform_url.clone(),
            anon_key: config.platform_anon_key().to_string(),
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> PlatformResult<Url> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    pub(crate) fn anon_key(&self) -> &str {
        &self.anon_key
    }

    /// Request with the public key; `bearer` defaults to the public key.
    pub(crate) fn request(
        &self,
        method: reqwest::Method,
        url: Url,
        bearer: Option<&str>,
    ) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(PLATFORM_APIKEY_HEADER, &self.anon_key)
            .bearer_auth(bearer.unwrap_or(&self.anon_key))
    }

    /// Decode a JSON success body or turn the error body into `PlatformError::Api`.
    pub(crate) async fn read<T: DeserializeOwned>(response: Response) -> PlatformResult<T> {
        let response = Self::check(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| PlatformError::Decode(e.to_string()))
    }

    pub(crate) async fn check(response: Response) -> PlatformResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        tracing::warn!(status = status.as_u16(), %message, "Platform request rejected");

        Err(PlatformError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Pull a readable message out of the platform's error envelopes.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let text = ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))?;

    match value.get("error_code").and_then(|v| v.as_str()) {
        Some(code) => Some(format!("{} ({})", text, code)),
        None => Some(text.to_string()),
    }
}
