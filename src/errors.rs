//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion. Every failure is logged with
//! its diagnostic detail while the client only sees a simplified message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{AccessDenial, DomainError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::config::LOGIN_REDIRECT_PATH;
use crate::infra::platform::PlatformError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Configuration
    #[error("{0}")]
    Configuration(String),

    // Authentication & Authorization
    #[error("{0}")]
    AccessDenied(AccessDenial),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Please confirm your email address before logging in")]
    EmailNotConfirmed,

    #[error("This email is already registered. Please log in instead")]
    EmailAlreadyRegistered,

    #[error("{0}")]
    SelfAction(String),

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{0}")]
    InvalidTransition(String),

    // Validation
    #[error("{message}")]
    Validation {
        field: Option<String>,
        message: String,
    },

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Platform error")]
    Platform(PlatformError),

    #[error("Image upload failed")]
    Upload(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<&'static str>,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::AccessDenied(denial) => denial.code(),
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::EmailNotConfirmed => "EMAIL_NOT_CONFIRMED",
            AppError::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            AppError::SelfAction(_) => "SELF_ACTION_FORBIDDEN",
            AppError::NotFound => "NOT_FOUND",
            AppError::InvalidTransition(_) => "INVALID_TRANSITION",
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Platform(_) => "PLATFORM_ERROR",
            AppError::Upload(_) => "UPLOAD_FAILED",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::AccessDenied(AccessDenial::NoSession)
            | AppError::InvalidCredentials
            | AppError::EmailNotConfirmed => StatusCode::UNAUTHORIZED,
            AppError::AccessDenied(_) | AppError::SelfAction(_) => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::EmailAlreadyRegistered | AppError::InvalidTransition(_) => {
                StatusCode::CONFLICT
            }
            AppError::Validation { .. } | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Platform(_) | AppError::Upload(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                msg.clone()
            }
            AppError::AccessDenied(denial) => denial.message(),

            // Hide details for internal/security errors
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred. Please try again".to_string()
            }
            AppError::Platform(e) => {
                tracing::error!("Platform error: {:?}", e);
                "The backend platform could not complete the request. Please try again"
                    .to_string()
            }
            AppError::Upload(msg) => {
                tracing::error!("Upload error: {}", msg);
                "Image upload failed. The record was not saved".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }

    /// Field the error is scoped to, for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            AppError::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// Where the client should navigate after this error
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            AppError::AccessDenied(_) => Some(LOGIN_REDIRECT_PATH),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
                field: self.field().map(str::to_string),
                redirect: self.redirect(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { field, message } => AppError::Validation {
                field: Some(field.to_string()),
                message,
            },
            e @ DomainError::InvalidTransition { .. } => AppError::InvalidTransition(e.to_string()),
            e @ DomainError::SelfAction(_) => AppError::SelfAction(e.to_string()),
            DomainError::AccessDenied(denial) => AppError::AccessDenied(denial),
        }
    }
}

impl From<PlatformError> for AppError {
    fn from(err: PlatformError) -> Self {
        let text = err.to_string();
        if mentions_duplicate_email(&text) {
            AppError::EmailAlreadyRegistered
        } else if EMAIL_NOT_CONFIRMED.is_match(&text) {
            AppError::EmailNotConfirmed
        } else if INVALID_LOGIN.is_match(&text) {
            AppError::InvalidCredentials
        } else if err.is_unauthorized() {
            AppError::AccessDenied(AccessDenial::NoSession)
        } else {
            AppError::Platform(err)
        }
    }
}

// Unique violations on other tables or keys must not read as a taken email.
static DUPLICATE_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)user already registered|profiles_email_key|email_exists|user_already_exists")
        .unwrap()
});

static EMAIL_NOT_CONFIRMED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)email not confirmed|email_not_confirmed").unwrap());

static INVALID_LOGIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)invalid login credentials|invalid_credentials|invalid_grant").unwrap()
});

/// Recognize the duplicate-email failure from identity or table store text.
pub fn mentions_duplicate_email(text: &str) -> bool {
    DUPLICATE_EMAIL.is_match(text)
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation {
            field: None,
            message: msg.into(),
        }
    }

    pub fn field_validation(field: impl Into<String>, msg: impl Into<String>) -> Self {
        AppError::Validation {
            field: Some(field.into()),
            message: msg.into(),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
