//! Authentication service - registration, sign-in and password flows.
//!
//! Credentials never touch this process beyond being forwarded to the
//! identity platform; the profile table decides who reaches the dashboard.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use utoipa::ToSchema;

use super::gate_service::{admit, force_sign_out};
use crate::errors::{mentions_duplicate_email, AppError, AppResult};
use crate::infra::{IdentityProvider, PlatformError, Session, UnitOfWork};
use domain::{
    NewProfile, Profile, MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_REASON_LENGTH, OTP_CODE_LENGTH,
};

/// Self-registration input
#[derive(Debug, Clone)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub reason: String,
}

/// Session tokens handed back to the dashboard
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    pub refresh_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 3600)]
    pub expires_in: i64,
}

impl From<Session> for SessionResponse {
    fn from(s: Session) -> Self {
        Self {
            access_token: s.access_token,
            refresh_token: s.refresh_token,
            token_type: s.token_type,
            expires_in: s.expires_in,
        }
    }
}

/// Successful dashboard login
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub session: SessionResponse,
    pub profile: Profile,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a pending admin account
    async fn register(&self, registration: Registration) -> AppResult<Profile>;

    /// Sign in and pass the dashboard gate in one step
    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse>;

    /// Ask the platform to e-mail a one-time login code
    async fn send_otp(&self, email: String) -> AppResult<()>;

    /// Exchange a one-time code for a session
    async fn verify_otp(&self, email: String, code: String) -> AppResult<SessionResponse>;

    /// Change the password of the session's identity, then end the session
    async fn update_password(
        &self,
        access_token: &str,
        password: String,
        confirm_password: String,
    ) -> AppResult<()>;

    async fn logout(&self, access_token: &str) -> AppResult<()>;
}

static SAME_PASSWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)same_password|different from the old password").unwrap()
});

fn check_new_password(password: &str, confirm_password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::field_validation(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
        ));
    }
    if password != confirm_password {
        return Err(AppError::field_validation(
            "confirm_password",
            "Password confirmation does not match",
        ));
    }
    Ok(())
}

fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::field_validation("email", "Email is required"));
    }
    Ok(email)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    identity: Arc<dyn IdentityProvider>,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { uow, identity }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, registration: Registration) -> AppResult<Profile> {
        let full_name = registration.full_name.trim().to_string();
        if full_name.chars().count() < MIN_NAME_LENGTH {
            return Err(AppError::field_validation(
                "full_name",
                format!("Full name must be at least {} characters", MIN_NAME_LENGTH),
            ));
        }
        let reason = registration.reason.trim().to_string();
        if reason.chars().count() < MIN_REASON_LENGTH {
            return Err(AppError::field_validation(
                "reason",
                format!("Reason must be at least {} characters", MIN_REASON_LENGTH),
            ));
        }
        let email = normalize_email(&registration.email)?;
        check_new_password(&registration.password, &registration.confirm_password)?;

        if self.uow.profiles().find_by_email(&email).await?.is_some() {
            tracing::info!(%email, "Registration refused: email already has a profile");
            return Err(AppError::EmailAlreadyRegistered);
        }

        let metadata = json!({ "full_name": full_name, "reason": reason });
        let user = self
            .identity
            .sign_up(&email, &registration.password, metadata)
            .await
            .map_err(|e| {
                tracing::warn!(%email, error = %e, "Identity sign-up failed");
                AppError::from(e)
            })?;

        let profile = NewProfile::registration(user.id, full_name, email, reason);
        let created = self
            .uow
            .profiles()
            .upsert_registration(profile)
            .await
            .map_err(|e| match e {
                AppError::Database(db) if mentions_duplicate_email(&db.to_string()) => {
                    AppError::EmailAlreadyRegistered
                }
                other => other,
            })?;

        tracing::info!(profile_id = %created.id, "Registered pending admin");
        Ok(created)
    }

    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse> {
        let email = normalize_email(&email)?;
        if password.is_empty() {
            return Err(AppError::field_validation("password", "Password is required"));
        }

        let session = self
            .identity
            .sign_in_with_password(&email, &password)
            .await
            .map_err(|e| {
                tracing::warn!(%email, error = %e, "Sign-in failed");
                AppError::from(e)
            })?;

        match admit(self.uow.profiles().as_ref(), session.user.id).await {
            Ok(profile) => {
                tracing::info!(profile_id = %profile.id, "Admin signed in");
                Ok(LoginResponse {
                    session: session.into(),
                    profile,
                })
            }
            Err(e) => {
                force_sign_out(self.identity.as_ref(), &session.access_token).await;
                Err(e)
            }
        }
    }

    async fn send_otp(&self, email: String) -> AppResult<()> {
        let email = normalize_email(&email)?;
        self.identity.send_otp(&email).await.map_err(|e| {
            tracing::warn!(%email, error = %e, "Sending login code failed");
            AppError::from(e)
        })
    }

    async fn verify_otp(&self, email: String, code: String) -> AppResult<SessionResponse> {
        let email = normalize_email(&email)?;
        let code = code.trim();
        if code.len() != OTP_CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::field_validation(
                "code",
                format!("Enter the {}-digit code from your e-mail", OTP_CODE_LENGTH),
            ));
        }

        let session = self.identity.verify_otp(&email, code).await.map_err(|e| {
            tracing::warn!(%email, error = %e, "Login code rejected");
            match e {
                PlatformError::Api { status, .. } if status < 500 => AppError::field_validation(
                    "code",
                    "The code is invalid or has expired. Request a new one",
                ),
                other => AppError::from(other),
            }
        })?;

        Ok(session.into())
    }

    async fn update_password(
        &self,
        access_token: &str,
        password: String,
        confirm_password: String,
    ) -> AppResult<()> {
        check_new_password(&password, &confirm_password)?;

        self.identity
            .update_password(access_token, &password)
            .await
            .map_err(|e| {
                if SAME_PASSWORD.is_match(&e.to_string()) {
                    return AppError::field_validation(
                        "password",
                        "New password must be different from the old password",
                    );
                }
                tracing::warn!(error = %e, "Password update failed");
                AppError::from(e)
            })?;

        force_sign_out(self.identity.as_ref(), access_token).await;
        Ok(())
    }

    async fn logout(&self, access_token: &str) -> AppResult<()> {
        match self.identity.sign_out(access_token).await {
            Ok(()) => Ok(()),
            // An expired session is already signed out
            Err(e) if e.is_unauthorized() => Ok(()),
            Err(e) => Err(AppError::from(e)),
        }
    }
}
