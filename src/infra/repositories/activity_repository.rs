//! Activity repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::activity::{self, ActiveModel, Entity as ActivityEntity};
use crate::errors::{AppError, AppResult};
use domain::{Activity, ActivityDraft, ActivityStatus};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Activities in canonical order; `only_active` limits to public rows
    async fn list(&self, only_active: bool) -> AppResult<Vec<Activity>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Activity>>;

    async fn create(
        &self,
        draft: ActivityDraft,
        image_url: String,
        created_by: Uuid,
    ) -> AppResult<Activity>;

    /// Overwrite the editable fields; `image_url: None` keeps the stored image
    async fn update(
        &self,
        id: Uuid,
        draft: ActivityDraft,
        image_url: Option<String>,
        updated_by: Uuid,
    ) -> AppResult<Activity>;

    /// Permanently delete an activity
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct ActivityStore {
    db: DatabaseConnection,
}

impl ActivityStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn apply_draft(active: &mut ActiveModel, draft: ActivityDraft) {
    active.title = Set(draft.title);
    active.description = Set(draft.description);
    active.content = Set(draft.content);
    active.status = Set(draft.status.as_str().to_string());
    active.category = Set(draft.category);
    active.tags = Set(serde_json::json!(draft.tags));
    active.registration_link = Set(draft.registration_link);
    active.order_index = Set(draft.order_index);
}

#[async_trait]
impl ActivityRepository for ActivityStore {
    async fn list(&self, only_active: bool) -> AppResult<Vec<Activity>> {
        let mut query = ActivityEntity::find();
        if only_active {
            query = query.filter(activity::Column::Status.eq(ActivityStatus::Active.as_str()));
        }

        let models = query
            .order_by_asc(activity::Column::OrderIndex)
            .order_by_desc(activity::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Activity::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Activity>> {
        let result = ActivityEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Activity::from))
    }

    async fn create(
        &self,
        draft: ActivityDraft,
        image_url: String,
        created_by: Uuid,
    ) -> AppResult<Activity> {
        let mut active = ActiveModel {
            id: Set(Uuid::new_v4()),
            image_url: Set(Some(image_url)),
            created_by: Set(Some(created_by)),
            created_at: Set(Utc::now()),
            updated_by: Set(None),
            updated_at: Set(None),
            ..Default::default()
        };
        apply_draft(&mut active, draft);

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Activity::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        draft: ActivityDraft,
        image_url: Option<String>,
        updated_by: Uuid,
    ) -> AppResult<Activity> {
        let existing = ActivityEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        apply_draft(&mut active, draft);
        if let Some(url) = image_url {
            active.image_url = Set(Some(url));
        }
        active.updated_by = Set(Some(updated_by));
        active.updated_at = Set(Some(Utc::now()));

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Activity::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = ActivityEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
