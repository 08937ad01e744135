//! Admin management - approval queue, lifecycle actions and own settings.
//!
//! Every mutation goes through the domain transition function; this
//! service only loads the target, writes the computed columns, and skips
//! the write entirely when the transition is a no-op.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use domain::{
    apply_edit, transition, LifecycleUpdate, Profile, ProfileAction, ProfileStatus, Role,
    MAX_NAME_LENGTH, MIN_NAME_LENGTH,
};

/// Profiles per role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct RoleCounts {
    pub user: usize,
    pub admin: usize,
    pub super_admin: usize,
}

/// Profiles per lifecycle status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusCounts {
    pub pending_verification: usize,
    pub active: usize,
    pub inactive: usize,
    pub suspended: usize,
    pub rejected: usize,
    pub approved: usize,
}

/// Admin-management listing. Counts cover every profile, not just the
/// filtered page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileListing {
    pub profiles: Vec<Profile>,
    pub total: usize,
    pub by_role: RoleCounts,
    pub by_status: StatusCounts,
}

impl ProfileListing {
    fn build(
        all: Vec<Profile>,
        role: Option<Role>,
        status: Option<ProfileStatus>,
        search: Option<&str>,
    ) -> Self {
        let mut by_role = RoleCounts::default();
        let mut by_status = StatusCounts::default();
        for p in &all {
            match p.role {
                Role::User => by_role.user += 1,
                Role::Admin => by_role.admin += 1,
                Role::SuperAdmin => by_role.super_admin += 1,
            }
            match p.status {
                ProfileStatus::PendingVerification => by_status.pending_verification += 1,
                ProfileStatus::Active => by_status.active += 1,
                ProfileStatus::Inactive => by_status.inactive += 1,
                ProfileStatus::Suspended => by_status.suspended += 1,
                ProfileStatus::Rejected => by_status.rejected += 1,
                ProfileStatus::Approved => by_status.approved += 1,
            }
        }

        let total = all.len();
        let needle = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let profiles = all
            .into_iter()
            .filter(|p| role.map_or(true, |r| p.role == r))
            .filter(|p| status.map_or(true, |s| p.status == s))
            .filter(|p| match &needle {
                Some(needle) => matches_search(p, needle),
                None => true,
            })
            .collect();

        Self {
            profiles,
            total,
            by_role,
            by_status,
        }
    }
}

fn matches_search(profile: &Profile, needle: &str) -> bool {
    let name = profile.full_name.as_deref().unwrap_or_default().to_lowercase();
    name.contains(needle)
        || profile.email.to_lowercase().contains(needle)
        || profile.role.as_str().contains(needle)
}

#[async_trait]
pub trait AdminService: Send + Sync {
    /// Registrations awaiting a decision, newest first
    async fn list_pending(&self) -> AppResult<Vec<Profile>>;

    /// Filtered profile listing with role and status counts
    async fn list(
        &self,
        role: Option<Role>,
        status: Option<ProfileStatus>,
        search: Option<String>,
    ) -> AppResult<ProfileListing>;

    async fn get(&self, id: Uuid) -> AppResult<Profile>;

    /// Apply one lifecycle action taken by `actor` to profile `id`
    async fn apply(&self, actor: Uuid, id: Uuid, action: ProfileAction) -> AppResult<Profile>;

    /// Direct role and/or status edit from the management table
    async fn edit(
        &self,
        actor: Uuid,
        id: Uuid,
        role: Option<Role>,
        status: Option<ProfileStatus>,
    ) -> AppResult<Profile>;

    /// Soft delete; the row stays and is suspended
    async fn soft_delete(&self, actor: Uuid, id: Uuid) -> AppResult<Profile>;

    /// Change the acting admin's display name
    async fn update_own_name(&self, actor: Uuid, full_name: String) -> AppResult<Profile>;
}

pub struct AdminManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AdminManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Persist `next` unless it equals `current`.
    async fn save(&self, current: Profile, next: Profile) -> AppResult<Profile> {
        if next == current {
            tracing::debug!(profile_id = %current.id, "Lifecycle action is a no-op");
            return Ok(current);
        }

        let at = next.updated_at.unwrap_or_else(Utc::now);
        let saved = self
            .uow
            .profiles()
            .update_lifecycle(next.id, LifecycleUpdate::from(&next), at)
            .await?;

        tracing::info!(
            profile_id = %saved.id,
            from = %current.status,
            to = %saved.status,
            role = %saved.role,
            "Profile lifecycle updated"
        );
        Ok(saved)
    }
}

#[async_trait]
impl<U: UnitOfWork> AdminService for AdminManager<U> {
    async fn list_pending(&self) -> AppResult<Vec<Profile>> {
        self.uow
            .profiles()
            .list(None, Some(ProfileStatus::PendingVerification))
            .await
    }

    async fn list(
        &self,
        role: Option<Role>,
        status: Option<ProfileStatus>,
        search: Option<String>,
    ) -> AppResult<ProfileListing> {
        let all = self.uow.profiles().list(None, None).await?;
        Ok(ProfileListing::build(all, role, status, search.as_deref()))
    }

    async fn get(&self, id: Uuid) -> AppResult<Profile> {
        self.uow.profiles().find_by_id(id).await?.ok_or_not_found()
    }

    async fn apply(&self, actor: Uuid, id: Uuid, action: ProfileAction) -> AppResult<Profile> {
        let current = self.get(id).await?;
        let next = transition(&current, action, actor, Utc::now()).map_err(|e| {
            tracing::warn!(%actor, profile_id = %id, ?action, error = %e, "Lifecycle action refused");
            AppError::from(e)
        })?;
        self.save(current, next).await
    }

    async fn edit(
        &self,
        actor: Uuid,
        id: Uuid,
        role: Option<Role>,
        status: Option<ProfileStatus>,
    ) -> AppResult<Profile> {
        let current = self.get(id).await?;
        let next = apply_edit(&current, role, status, actor, Utc::now()).map_err(|e| {
            tracing::warn!(%actor, profile_id = %id, error = %e, "Profile edit refused");
            AppError::from(e)
        })?;
        self.save(current, next).await
    }

    async fn soft_delete(&self, actor: Uuid, id: Uuid) -> AppResult<Profile> {
        self.apply(actor, id, ProfileAction::Suspend).await
    }

    async fn update_own_name(&self, actor: Uuid, full_name: String) -> AppResult<Profile> {
        let full_name = full_name.trim().to_string();
        let len = full_name.chars().count();
        if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&len) {
            return Err(AppError::field_validation(
                "full_name",
                format!(
                    "Full name must be between {} and {} characters",
                    MIN_NAME_LENGTH, MAX_NAME_LENGTH
                ),
            ));
        }

        self.uow.profiles().update_full_name(actor, full_name).await
    }
}
