//! Profile repository: the source of truth for dashboard authorization.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::profile::{self, ActiveModel, Entity as ProfileEntity};
use crate::errors::{AppError, AppResult};
use domain::{LifecycleUpdate, NewProfile, Profile, ProfileStatus, Role};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Profile repository trait for dependency injection.
///
/// Every mutation is keyed on the identity id (`profiles.id`).
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Profile>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Profile>>;

    /// Insert the registration row, or overwrite one written concurrently
    /// by the platform's profile trigger for the same identity.
    async fn upsert_registration(&self, profile: NewProfile) -> AppResult<Profile>;

    /// Profiles newest first, optionally filtered by role and status
    async fn list(&self, role: Option<Role>, status: Option<ProfileStatus>)
        -> AppResult<Vec<Profile>>;

    /// Write the lifecycle columns computed by the transition function
    async fn update_lifecycle(
        &self,
        id: Uuid,
        update: LifecycleUpdate,
        at: DateTime<Utc>,
    ) -> AppResult<Profile>;

    async fn update_full_name(&self, id: Uuid, full_name: String) -> AppResult<Profile>;
}

/// Concrete implementation of ProfileRepository
pub struct ProfileStore {
    db: DatabaseConnection,
}

impl ProfileStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: Uuid) -> AppResult<profile::Model> {
        ProfileEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl ProfileRepository for ProfileStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Profile>> {
        let result = ProfileEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Profile::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Profile>> {
        let result = ProfileEntity::find()
            .filter(profile::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Profile::from))
    }

    async fn upsert_registration(&self, new: NewProfile) -> AppResult<Profile> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(new.id),
            full_name: Set(Some(new.full_name)),
            email: Set(new.email),
            role: Set(new.role.as_str().to_string()),
            status: Set(new.status.as_str().to_string()),
            is_approved: Set(new.is_approved),
            reason: Set(Some(new.reason)),
            created_at: Set(now),
            updated_at: Set(Some(now)),
            ..Default::default()
        };

        let model = ProfileEntity::insert(active_model)
            .on_conflict(
                OnConflict::column(profile::Column::Id)
                    .update_columns([
                        profile::Column::FullName,
                        profile::Column::Email,
                        profile::Column::Role,
                        profile::Column::Status,
                        profile::Column::IsApproved,
                        profile::Column::Reason,
                        profile::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Profile::from(model))
    }

    async fn list(
        &self,
        role: Option<Role>,
        status: Option<ProfileStatus>,
    ) -> AppResult<Vec<Profile>> {
        let mut query = ProfileEntity::find();
        if let Some(role) = role {
            query = query.filter(profile::Column::Role.eq(role.as_str()));
        }
        if let Some(status) = status {
            query = query.filter(profile::Column::Status.eq(status.as_str()));
        }

        let models = query
            .order_by_desc(profile::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Profile::from).collect())
    }

    async fn update_lifecycle(
        &self,
        id: Uuid,
        update: LifecycleUpdate,
        at: DateTime<Utc>,
    ) -> AppResult<Profile> {
        let mut active: ActiveModel = self.find_model(id).await?.into();

        active.role = Set(update.role.as_str().to_string());
        active.status = Set(update.status.as_str().to_string());
        active.is_approved = Set(update.is_approved);
        active.approved_at = Set(update.approved_at);
        active.approved_by = Set(update.approved_by);
        active.rejected_at = Set(update.rejected_at);
        active.suspended_at = Set(update.suspended_at);
        active.updated_at = Set(Some(at));

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Profile::from(model))
    }

    async fn update_full_name(&self, id: Uuid, full_name: String) -> AppResult<Profile> {
        let mut active: ActiveModel = self.find_model(id).await?.into();
        active.full_name = Set(Some(full_name));
        active.updated_at = Set(Some(Utc::now()));

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Profile::from(model))
    }
}
