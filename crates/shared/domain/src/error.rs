//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database, platform).

use thiserror::Error;

use crate::access::AccessDenial;
use crate::profile::ProfileStatus;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A single input field failed validation
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The requested lifecycle action is not legal from the current status
    #[error("Cannot {action} a profile that is {from}")]
    InvalidTransition {
        action: &'static str,
        from: ProfileStatus,
    },

    /// An admin tried to reject, suspend or demote their own account
    #[error("You cannot {0} your own account")]
    SelfAction(&'static str),

    /// The profile may not reach the dashboard
    #[error("{0}")]
    AccessDenied(AccessDenial),
}

impl DomainError {
    /// Create a field-scoped validation error
    pub fn validation(field: &'static str, msg: impl Into<String>) -> Self {
        DomainError::Validation {
            field,
            message: msg.into(),
        }
    }

    /// Field name for validation errors
    pub fn field(&self) -> Option<&'static str> {
        match self {
            DomainError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
