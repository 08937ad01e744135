//! Application settings loaded from environment variables.

use std::env;

use url::Url;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_STORAGE_BUCKET,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Base URL of the backend platform (identity, storage)
    pub platform_url: Url,
    platform_anon_key: String,
    pub database_url: String,
    pub redis_url: String,
    pub storage_bucket: String,
    pub server_host: String,
    pub server_port: u16,
    /// Public site origin, used as redirect target in one-time code e-mails
    pub public_site_url: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("platform_url", &self.platform_url.as_str())
            .field("platform_anon_key", &"[REDACTED]")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("storage_bucket", &self.storage_bucket)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("public_site_url", &self.public_site_url)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env`).
    ///
    /// Returns `AppError::Configuration` when the platform URL or public
    /// key is missing, so the caller can surface it instead of crashing.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<&str> = ["PLATFORM_URL", "PLATFORM_ANON_KEY"]
            .into_iter()
            .filter(|key| get(key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::configuration(format!(
                "Platform configuration missing: set {} in the environment",
                missing.join(" and ")
            )));
        }

        let raw_url = get("PLATFORM_URL").unwrap_or_default();
        let mut platform_url = Url::parse(raw_url.trim()).map_err(|e| {
            AppError::configuration(format!("PLATFORM_URL is not a valid URL: {}", e))
        })?;
        // Endpoints are joined relative to this base, so it must end in a slash
        if !platform_url.path().ends_with('/') {
            let path = format!("{}/", platform_url.path());
            platform_url.set_path(&path);
        }

        Ok(Self {
            platform_url,
            platform_anon_key: get("PLATFORM_ANON_KEY").unwrap_or_default(),
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            redis_url: get("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
            storage_bucket: get("STORAGE_BUCKET")
                .unwrap_or_else(|| DEFAULT_STORAGE_BUCKET.to_string()),
            server_host: get("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port: get("SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            public_site_url: get("PUBLIC_SITE_URL"),
        })
    }

    /// Public API key sent with every platform request.
    pub fn platform_anon_key(&self) -> &str {
        &self.platform_anon_key
    }
}
