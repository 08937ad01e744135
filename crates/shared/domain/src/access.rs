//! Dashboard access rule.
//!
//! A profile reaches the dashboard only when its role is privileged, it is
//! approved, and its status is `active`. Every denial names the clause that
//! failed so the visitor can be told how to proceed.

use crate::profile::{Profile, ProfileStatus};

/// Why a visitor was turned away from the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenial {
    /// No session, or the identity store rejected the token
    NoSession,
    /// An identity exists without a matching profile row
    ProfileMissing,
    /// The profile does not carry an admin role
    WrongRole,
    /// Registered but not yet approved
    AwaitingApproval,
    /// Approved at some point but currently not active
    NotActive(ProfileStatus),
}

impl AccessDenial {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AccessDenial::NoSession => "SESSION_REQUIRED",
            AccessDenial::ProfileMissing => "PROFILE_NOT_FOUND",
            AccessDenial::WrongRole => "ADMIN_REQUIRED",
            AccessDenial::AwaitingApproval => "AWAITING_APPROVAL",
            AccessDenial::NotActive(_) => "ACCOUNT_INACTIVE",
        }
    }

    /// User-facing message pointing at the remediation path
    pub fn message(&self) -> String {
        match self {
            AccessDenial::NoSession => "Please log in to continue.".to_string(),
            AccessDenial::ProfileMissing => {
                "Account not found. Please register first.".to_string()
            }
            AccessDenial::WrongRole => {
                "Only administrators can access this page.".to_string()
            }
            AccessDenial::AwaitingApproval => {
                "Your account is awaiting approval by the head administrator.".to_string()
            }
            AccessDenial::NotActive(status) => format!(
                "Your account is {}. Please contact an administrator for assistance.",
                status
            ),
        }
    }

    /// Denials that leave a live session behind and must sign it out
    pub fn requires_sign_out(&self) -> bool {
        !matches!(self, AccessDenial::NoSession)
    }
}

impl std::fmt::Display for AccessDenial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// Evaluate the dashboard access rule for a loaded profile.
pub fn check_access(profile: &Profile) -> Result<(), AccessDenial> {
    if !profile.role.is_privileged() {
        return Err(AccessDenial::WrongRole);
    }

    match profile.status {
        ProfileStatus::Active if profile.is_approved => Ok(()),
        ProfileStatus::Active | ProfileStatus::PendingVerification => {
            Err(AccessDenial::AwaitingApproval)
        }
        other => Err(AccessDenial::NotActive(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Role;
    use chrono::Utc;
    use uuid::Uuid;

    fn profile(role: Role, status: ProfileStatus, is_approved: bool) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            profile_id: 1,
            full_name: Some("Test".into()),
            email: "t@example.com".into(),
            role,
            status,
            is_approved,
            reason: None,
            created_at: Utc::now(),
            updated_at: None,
            approved_at: None,
            approved_by: None,
            rejected_at: None,
            suspended_at: None,
        }
    }

    #[test]
    fn test_active_approved_admin_passes() {
        assert!(check_access(&profile(Role::Admin, ProfileStatus::Active, true)).is_ok());
        assert!(check_access(&profile(Role::SuperAdmin, ProfileStatus::Active, true)).is_ok());
    }

    #[test]
    fn test_pending_is_awaiting_approval() {
        let denial =
            check_access(&profile(Role::Admin, ProfileStatus::PendingVerification, false))
                .unwrap_err();
        assert_eq!(denial, AccessDenial::AwaitingApproval);
        assert!(denial.message().contains("awaiting approval"));
    }

    #[test]
    fn test_active_but_unapproved_is_denied() {
        let denial = check_access(&profile(Role::Admin, ProfileStatus::Active, false)).unwrap_err();
        assert_eq!(denial, AccessDenial::AwaitingApproval);
    }

    #[test]
    fn test_wrong_role_checked_first() {
        let denial = check_access(&profile(Role::User, ProfileStatus::Active, true)).unwrap_err();
        assert_eq!(denial, AccessDenial::WrongRole);
    }

    #[test]
    fn test_suspended_and_legacy_approved_are_not_active() {
        for status in [
            ProfileStatus::Suspended,
            ProfileStatus::Rejected,
            ProfileStatus::Inactive,
            ProfileStatus::Approved,
        ] {
            let denial = check_access(&profile(Role::Admin, status, true)).unwrap_err();
            assert_eq!(denial, AccessDenial::NotActive(status));
            assert_eq!(denial.code(), "ACCOUNT_INACTIVE");
        }
    }

    #[test]
    fn test_no_session_needs_no_sign_out() {
        assert!(!AccessDenial::NoSession.requires_sign_out());
        assert!(AccessDenial::WrongRole.requires_sign_out());
    }
}
