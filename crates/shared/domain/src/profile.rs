//! Profile entity: one row per registered identity, source of truth for authorization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    ROLE_ADMIN, ROLE_SUPER_ADMIN, ROLE_USER, STATUS_ACTIVE, STATUS_APPROVED, STATUS_INACTIVE,
    STATUS_PENDING_VERIFICATION, STATUS_REJECTED, STATUS_SUSPENDED,
};
use crate::error::{DomainError, DomainResult};

/// Profile roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Roles that may reach the admin dashboard
    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Admin => ROLE_ADMIN,
            Role::SuperAdmin => ROLE_SUPER_ADMIN,
        }
    }

    /// Strict parse for user input.
    pub fn parse(s: &str) -> DomainResult<Self> {
        match s {
            ROLE_USER => Ok(Role::User),
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_SUPER_ADMIN => Ok(Role::SuperAdmin),
            other => Err(DomainError::validation(
                "role",
                format!("Unknown role '{}'. Must be user, admin or super_admin", other),
            )),
        }
    }
}

/// Lenient conversion for stored values; unknown roles fall back to `User`.
impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Role::parse(s).unwrap_or(Role::User)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    PendingVerification,
    Active,
    Inactive,
    Suspended,
    Rejected,
    Approved,
}

impl ProfileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileStatus::PendingVerification => STATUS_PENDING_VERIFICATION,
            ProfileStatus::Active => STATUS_ACTIVE,
            ProfileStatus::Inactive => STATUS_INACTIVE,
            ProfileStatus::Suspended => STATUS_SUSPENDED,
            ProfileStatus::Rejected => STATUS_REJECTED,
            ProfileStatus::Approved => STATUS_APPROVED,
        }
    }

    /// Strict parse for user input.
    pub fn parse(s: &str) -> DomainResult<Self> {
        match s {
            STATUS_PENDING_VERIFICATION => Ok(ProfileStatus::PendingVerification),
            STATUS_ACTIVE => Ok(ProfileStatus::Active),
            STATUS_INACTIVE => Ok(ProfileStatus::Inactive),
            STATUS_SUSPENDED => Ok(ProfileStatus::Suspended),
            STATUS_REJECTED => Ok(ProfileStatus::Rejected),
            STATUS_APPROVED => Ok(ProfileStatus::Approved),
            other => Err(DomainError::validation(
                "status",
                format!("Unknown status '{}'", other),
            )),
        }
    }
}

/// Lenient conversion for stored values; unknown statuses fall back to `Inactive`.
impl From<&str> for ProfileStatus {
    fn from(s: &str) -> Self {
        ProfileStatus::parse(s).unwrap_or(ProfileStatus::Inactive)
    }
}

impl std::fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Profile {
    /// Identity id; the canonical target for every profile mutation
    pub id: Uuid,
    /// Local surrogate key, display only
    pub profile_id: i64,
    pub full_name: Option<String>,
    pub email: String,
    pub role: Role,
    pub status: ProfileStatus,
    pub is_approved: bool,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<Uuid>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub suspended_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Name to show in the dashboard header, falling back to the email.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }

    /// Pending self-registration awaiting a decision
    pub fn is_pending(&self) -> bool {
        self.status == ProfileStatus::PendingVerification
    }
}

/// Row written at self-registration.
///
/// Construction goes through `NewProfile::registration`, so the role,
/// status and approval flag can never be chosen by the registrant.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub reason: String,
    pub role: Role,
    pub status: ProfileStatus,
    pub is_approved: bool,
}

impl NewProfile {
    pub fn registration(id: Uuid, full_name: String, email: String, reason: String) -> Self {
        Self {
            id,
            full_name,
            email,
            reason,
            role: Role::Admin,
            status: ProfileStatus::PendingVerification,
            is_approved: false,
        }
    }
}
