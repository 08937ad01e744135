//! Identity capability: sign-up, sign-in, one-time codes, sessions.

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{IdentityUser, PlatformClient, PlatformError, PlatformResult, Session};
use crate::config::{Config, PLATFORM_AUTH_PATH};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Identity store operations used by the site.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an identity with arbitrary profile metadata
    async fn sign_up(&self, email: &str, password: &str, metadata: Value)
        -> PlatformResult<IdentityUser>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> PlatformResult<Session>;

    /// E-mail a one-time login code to an existing identity
    async fn send_otp(&self, email: &str) -> PlatformResult<()>;

    async fn verify_otp(&self, email: &str, code: &str) -> PlatformResult<Session>;

    async fn sign_out(&self, access_token: &str) -> PlatformResult<()>;

    /// Resolve the identity behind an access token
    async fn get_user(&self, access_token: &str) -> PlatformResult<IdentityUser>;

    async fn update_password(&self, access_token: &str, password: &str) -> PlatformResult<()>;
}

/// `IdentityProvider` over the platform's REST identity API.
pub struct PlatformIdentity {
    client: PlatformClient,
    redirect_to: Option<String>,
}

impl PlatformIdentity {
    pub fn new(config: &Config) -> Self {
        Self {
            client: PlatformClient::new(config),
            redirect_to: config.public_site_url.clone(),
        }
    }

    fn url(&self, path: &str) -> PlatformResult<url::Url> {
        self.client
            .endpoint(&format!("{}{}", PLATFORM_AUTH_PATH, path))
    }
}

/// Sign-up returns a session when confirmation is disabled, a bare user otherwise.
#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(Session),
    User(IdentityUser),
}

#[async_trait]
impl IdentityProvider for PlatformIdentity {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> PlatformResult<IdentityUser> {
        let response = self
            .client
            .request(Method::POST, self.url("/signup")?, None)
            .json(&json!({ "email": email, "password": password, "data": metadata }))
            .send()
            .await?;

        match PlatformClient::read::<SignUpResponse>(response).await? {
            SignUpResponse::Session(session) => Ok(session.user),
            SignUpResponse::User(user) => Ok(user),
        }
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> PlatformResult<Session> {
        let mut url = self.url("/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let response = self
            .client
            .request(Method::POST, url, None)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        PlatformClient::read(response).await
    }

    async fn send_otp(&self, email: &str) -> PlatformResult<()> {
        let mut url = self.url("/otp")?;
        if let Some(redirect) = &self.redirect_to {
            url.query_pairs_mut().append_pair("redirect_to", redirect);
        }

        let response = self
            .client
            .request(Method::POST, url, None)
            .json(&json!({ "email": email, "create_user": false }))
            .send()
            .await?;

        PlatformClient::check(response).await.map(|_| ())
    }

    async fn verify_otp(&self, email: &str, code: &str) -> PlatformResult<Session> {
        let response = self
            .client
            .request(Method::POST, self.url("/verify")?, None)
            .json(&json!({ "type": "email", "email": email, "token": code }))
            .send()
            .await?;

        PlatformClient::read(response).await
    }

    async fn sign_out(&self, access_token: &str) -> PlatformResult<()> {
        let response = self
            .client
            .request(Method::POST, self.url("/logout")?, Some(access_token))
            .send()
            .await?;

        PlatformClient::check(response).await.map(|_| ())
    }

    async fn get_user(&self, access_token: &str) -> PlatformResult<IdentityUser> {
        if access_token.is_empty() || access_token == self.client.anon_key() {
            return Err(PlatformError::Api {
                status: 401,
                message: "missing user session".to_string(),
            });
        }

        let response = self
            .client
            .request(Method::GET, self.url("/user")?, Some(access_token))
            .send()
            .await?;

        PlatformClient::read(response).await
    }

    async fn update_password(&self, access_token: &str, password: &str) -> PlatformResult<()> {
        let response = self
            .client
            .request(Method::PUT, self.url("/user")?, Some(access_token))
            .json(&json!({ "password": password }))
            .send()
            .await?;

        PlatformClient::check(response).await.map(|_| ())
    }
}
