//! Timeline repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use super::entities::timeline::{self, ActiveModel, Entity as TimelineEntity};
use crate::errors::{AppError, AppResult};
use domain::{TimelineFields, TimelineItem};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TimelineRepository: Send + Sync {
    /// All items, newest date first
    async fn list(&self) -> AppResult<Vec<TimelineItem>>;

    async fn create(&self, fields: TimelineFields) -> AppResult<TimelineItem>;

    async fn update(&self, id: Uuid, fields: TimelineFields) -> AppResult<TimelineItem>;

    /// Permanently delete an item
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct TimelineStore {
    db: DatabaseConnection,
}

impl TimelineStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TimelineRepository for TimelineStore {
    async fn list(&self) -> AppResult<Vec<TimelineItem>> {
        let models = TimelineEntity::find()
            .order_by_desc(timeline::Column::Date)
            .order_by_desc(timeline::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(TimelineItem::from).collect())
    }

    async fn create(&self, fields: TimelineFields) -> AppResult<TimelineItem> {
        let active = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(fields.title),
            date: Set(fields.date),
            description: Set(fields.description),
            tags: Set(fields.tags),
            created_at: Set(Utc::now()),
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(TimelineItem::from(model))
    }

    async fn update(&self, id: Uuid, fields: TimelineFields) -> AppResult<TimelineItem> {
        let existing = TimelineEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.title = Set(fields.title);
        active.date = Set(fields.date);
        active.description = Set(fields.description);
        active.tags = Set(fields.tags);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(TimelineItem::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = TimelineEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
