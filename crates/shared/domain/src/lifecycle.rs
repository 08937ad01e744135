//! Admin identity lifecycle.
//!
//! Every profile mutation goes through [`transition`], which enumerates the
//! legal `(status, action) -> status'` pairs and recomputes the approval flag,
//! so the role/status/approval combination is decided in exactly one place.
//!
//! ```text
//! pending_verification --approve--> active --suspend--> suspended
//!          |                          ^                     |
//!          +--reject--> rejected      +------reactivate-----+
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::profile::{Profile, ProfileStatus, Role};

/// Closed set of lifecycle actions an admin can take on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "value")]
pub enum ProfileAction {
    Approve,
    Reject,
    Suspend,
    Reactivate,
    ChangeRole(Role),
    ChangeStatus(ProfileStatus),
}

impl ProfileAction {
    fn verb(&self) -> &'static str {
        match self {
            ProfileAction::Approve => "approve",
            ProfileAction::Reject => "reject",
            ProfileAction::Suspend => "suspend",
            ProfileAction::Reactivate => "reactivate",
            ProfileAction::ChangeRole(_) => "change the role of",
            ProfileAction::ChangeStatus(_) => "change the status of",
        }
    }

    /// Refuse actions an admin may not take against their own account.
    fn check_self_target(&self) -> DomainResult<()> {
        match self {
            ProfileAction::Reject => Err(DomainError::SelfAction("reject")),
            ProfileAction::Suspend => Err(DomainError::SelfAction("suspend")),
            ProfileAction::ChangeRole(role) if !role.is_privileged() => {
                Err(DomainError::SelfAction("demote"))
            }
            ProfileAction::ChangeStatus(status) if *status != ProfileStatus::Active => {
                Err(DomainError::SelfAction("deactivate"))
            }
            _ => Ok(()),
        }
    }
}

/// Lifecycle columns written by every profile mutation.
///
/// All fields are always written together, which keeps partial
/// "status without approval flag" updates out of the repository layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleUpdate {
    pub role: Role,
    pub status: ProfileStatus,
    pub is_approved: bool,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<Uuid>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub suspended_at: Option<DateTime<Utc>>,
}

impl From<&Profile> for LifecycleUpdate {
    fn from(p: &Profile) -> Self {
        Self {
            role: p.role,
            status: p.status,
            is_approved: p.is_approved,
            approved_at: p.approved_at,
            approved_by: p.approved_by,
            rejected_at: p.rejected_at,
            suspended_at: p.suspended_at,
        }
    }
}

/// Compute the next state of `profile` after `action` taken by `actor`.
///
/// Returns the profile unchanged when the action is a no-op from the
/// current state (re-approving an active profile, re-suspending a
/// suspended one), so callers can skip the write and retries stay safe.
pub fn transition(
    profile: &Profile,
    action: ProfileAction,
    actor: Uuid,
    now: DateTime<Utc>,
) -> DomainResult<Profile> {
    if profile.id == actor {
        action.check_self_target()?;
    }

    let invalid = || DomainError::InvalidTransition {
        action: action.verb(),
        from: profile.status,
    };

    use ProfileStatus::*;
    let next = match action {
        ProfileAction::Approve => match profile.status {
            Active if profile.is_approved => return Ok(profile.clone()),
            PendingVerification | Active | Suspended | Inactive | Approved => {
                activate(profile, actor, now)
            }
            Rejected => return Err(invalid()),
        },
        ProfileAction::Reactivate => match profile.status {
            Active if profile.is_approved => return Ok(profile.clone()),
            Active | Suspended | Inactive | Approved => activate(profile, actor, now),
            PendingVerification | Rejected => return Err(invalid()),
        },
        ProfileAction::Reject => match profile.status {
            Rejected => return Ok(profile.clone()),
            PendingVerification | Approved => Profile {
                status: Rejected,
                rejected_at: Some(now),
                ..profile.clone()
            },
            Active | Suspended | Inactive => return Err(invalid()),
        },
        ProfileAction::Suspend => match profile.status {
            Suspended => return Ok(profile.clone()),
            Active | Inactive => Profile {
                status: Suspended,
                suspended_at: Some(now),
                ..profile.clone()
            },
            PendingVerification | Rejected | Approved => return Err(invalid()),
        },
        ProfileAction::ChangeRole(role) => {
            if role == profile.role {
                return Ok(profile.clone());
            }
            let with_role = Profile {
                role,
                ..profile.clone()
            };
            // Granting privilege to an undecided registration activates it.
            if role.is_privileged() && profile.status == PendingVerification {
                activate(&with_role, actor, now)
            } else {
                with_role
            }
        }
        ProfileAction::ChangeStatus(status) => match status {
            Approved => {
                return Err(DomainError::validation(
                    "status",
                    "'approved' is a legacy status; use 'active' instead",
                ))
            }
            Active if profile.status == Active && profile.is_approved => {
                return Ok(profile.clone())
            }
            Active => activate(profile, actor, now),
            same if same == profile.status => return Ok(profile.clone()),
            Suspended => Profile {
                status: Suspended,
                suspended_at: Some(now),
                ..profile.clone()
            },
            Rejected => Profile {
                status: Rejected,
                rejected_at: Some(now),
                ..profile.clone()
            },
            PendingVerification | Inactive => Profile {
                status,
                ..profile.clone()
            },
        },
    };

    Ok(settle(next, now))
}

/// Apply an admin-management edit: role first, then status.
pub fn apply_edit(
    profile: &Profile,
    role: Option<Role>,
    status: Option<ProfileStatus>,
    actor: Uuid,
    now: DateTime<Utc>,
) -> DomainResult<Profile> {
    if role.is_none() && status.is_none() {
        return Err(DomainError::validation(
            "role",
            "Provide a role or a status to change",
        ));
    }

    let mut next = profile.clone();
    if let Some(role) = role {
        next = transition(&next, ProfileAction::ChangeRole(role), actor, now)?;
    }
    if let Some(status) = status {
        next = transition(&next, ProfileAction::ChangeStatus(status), actor, now)?;
    }
    Ok(next)
}

fn activate(profile: &Profile, actor: Uuid, now: DateTime<Utc>) -> Profile {
    Profile {
        status: ProfileStatus::Active,
        approved_by: Some(actor),
        approved_at: Some(now),
        ..profile.clone()
    }
}

/// Recompute the approval flag from role and status and stamp the update.
fn settle(mut next: Profile, now: DateTime<Utc>) -> Profile {
    next.is_approved = next.role.is_privileged() && next.status == ProfileStatus::Active;
    next.updated_at = Some(now);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::check_access;

    fn pending() -> Profile {
        Profile {
            id: Uuid::new_v4(),
            profile_id: 7,
            full_name: Some("Pending Admin".into()),
            email: "a@x.com".into(),
            role: Role::Admin,
            status: ProfileStatus::PendingVerification,
            is_approved: false,
            reason: Some("testing".into()),
            created_at: Utc::now(),
            updated_at: None,
            approved_at: None,
            approved_by: None,
            rejected_at: None,
            suspended_at: None,
        }
    }

    #[test]
    fn test_approve_pending_activates_and_stamps() {
        let actor = Uuid::new_v4();
        let now = Utc::now();
        let next = transition(&pending(), ProfileAction::Approve, actor, now).unwrap();

        assert_eq!(next.status, ProfileStatus::Active);
        assert!(next.is_approved);
        assert_eq!(next.approved_by, Some(actor));
        assert_eq!(next.approved_at, Some(now));
        assert!(check_access(&next).is_ok());
    }

    #[test]
    fn test_approve_is_idempotent() {
        let actor = Uuid::new_v4();
        let once = transition(&pending(), ProfileAction::Approve, actor, Utc::now()).unwrap();
        let twice = transition(&once, ProfileAction::Approve, actor, Utc::now()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_reject_pending() {
        let next = transition(&pending(), ProfileAction::Reject, Uuid::new_v4(), Utc::now()).unwrap();
        assert_eq!(next.status, ProfileStatus::Rejected);
        assert!(!next.is_approved);
        assert!(next.rejected_at.is_some());
    }

    #[test]
    fn test_rejected_cannot_be_approved() {
        let rejected =
            transition(&pending(), ProfileAction::Reject, Uuid::new_v4(), Utc::now()).unwrap();
        let err = transition(&rejected, ProfileAction::Approve, Uuid::new_v4(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[test]
    fn test_suspend_then_reactivate() {
        let actor = Uuid::new_v4();
        let active = transition(&pending(), ProfileAction::Approve, actor, Utc::now()).unwrap();
        let suspended = transition(&active, ProfileAction::Suspend, actor, Utc::now()).unwrap();
        assert_eq!(suspended.status, ProfileStatus::Suspended);
        assert!(!suspended.is_approved);
        assert!(suspended.suspended_at.is_some());

        let back = transition(&suspended, ProfileAction::Reactivate, actor, Utc::now()).unwrap();
        assert_eq!(back.status, ProfileStatus::Active);
        assert!(back.is_approved);
    }

    #[test]
    fn test_cannot_suspend_pending() {
        let err = transition(&pending(), ProfileAction::Suspend, Uuid::new_v4(), Utc::now())
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidTransition {
                from: ProfileStatus::PendingVerification,
                ..
            }
        ));
    }

    #[test]
    fn test_self_suspend_and_demote_refused() {
        let me = transition(&pending(), ProfileAction::Approve, Uuid::new_v4(), Utc::now()).unwrap();
        let err = transition(&me, ProfileAction::Suspend, me.id, Utc::now()).unwrap_err();
        assert_eq!(err, DomainError::SelfAction("suspend"));

        let err = transition(&me, ProfileAction::ChangeRole(Role::User), me.id, Utc::now())
            .unwrap_err();
        assert_eq!(err, DomainError::SelfAction("demote"));

        // Promoting yourself within privileged roles is not a demotion
        assert!(transition(&me, ProfileAction::ChangeRole(Role::SuperAdmin), me.id, Utc::now()).is_ok());
    }

    #[test]
    fn test_demote_to_user_clears_approval() {
        let actor = Uuid::new_v4();
        let active = transition(&pending(), ProfileAction::Approve, actor, Utc::now()).unwrap();
        let demoted =
            transition(&active, ProfileAction::ChangeRole(Role::User), actor, Utc::now()).unwrap();
        assert_eq!(demoted.role, Role::User);
        assert_eq!(demoted.status, ProfileStatus::Active);
        assert!(!demoted.is_approved);
    }

    #[test]
    fn test_granting_privilege_activates_pending_registration() {
        let mut user = pending();
        user.role = Role::User;
        let next = transition(
            &user,
            ProfileAction::ChangeRole(Role::SuperAdmin),
            Uuid::new_v4(),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(next.status, ProfileStatus::Active);
        assert!(next.is_approved);
    }

    #[test]
    fn test_legacy_approved_status_not_settable() {
        let err = transition(
            &pending(),
            ProfileAction::ChangeStatus(ProfileStatus::Approved),
            Uuid::new_v4(),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("status"));
    }

    #[test]
    fn test_apply_edit_requires_a_change() {
        assert!(apply_edit(&pending(), None, None, Uuid::new_v4(), Utc::now()).is_err());
    }

    #[test]
    fn test_apply_edit_role_then_status() {
        let actor = Uuid::new_v4();
        let next = apply_edit(
            &pending(),
            Some(Role::SuperAdmin),
            Some(ProfileStatus::Suspended),
            actor,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(next.role, Role::SuperAdmin);
        assert_eq!(next.status, ProfileStatus::Suspended);
        assert!(!next.is_approved);
    }

    #[test]
    fn test_lifecycle_update_mirrors_profile() {
        let next = transition(&pending(), ProfileAction::Approve, Uuid::new_v4(), Utc::now()).unwrap();
        let update = LifecycleUpdate::from(&next);
        assert_eq!(update.status, next.status);
        assert_eq!(update.is_approved, next.is_approved);
        assert_eq!(update.approved_by, next.approved_by);
    }
}
