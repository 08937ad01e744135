//! Contact message repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::contact_message::{self, ActiveModel, Entity as ContactEntity};
use crate::errors::{AppError, AppResult};
use domain::{ContactDraft, ContactMessage, ContactStatus};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Messages in insertion order, optionally filtered by status
    async fn list(&self, status: Option<ContactStatus>) -> AppResult<Vec<ContactMessage>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ContactMessage>>;

    /// Store a new message as unread
    async fn create(&self, draft: ContactDraft) -> AppResult<ContactMessage>;

    /// Persist status and reply annotation
    async fn update_status(&self, message: ContactMessage) -> AppResult<ContactMessage>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct ContactStore {
    db: DatabaseConnection,
}

impl ContactStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContactRepository for ContactStore {
    async fn list(&self, status: Option<ContactStatus>) -> AppResult<Vec<ContactMessage>> {
        let mut query = ContactEntity::find();
        if let Some(status) = status {
            query = query.filter(contact_message::Column::Status.eq(status.as_str()));
        }

        let models = query
            .order_by_asc(contact_message::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(ContactMessage::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ContactMessage>> {
        let result = ContactEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(ContactMessage::from))
    }

    async fn create(&self, draft: ContactDraft) -> AppResult<ContactMessage> {
        let active = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(draft.name),
            email: Set(draft.email),
            message: Set(draft.message),
            status: Set(ContactStatus::Unread.as_str().to_string()),
            notes: Set(None),
            replied_by: Set(None),
            replied_at: Set(None),
            created_at: Set(Utc::now()),
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(ContactMessage::from(model))
    }

    async fn update_status(&self, message: ContactMessage) -> AppResult<ContactMessage> {
        let existing = ContactEntity::find_by_id(message.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.status = Set(message.status.as_str().to_string());
        active.notes = Set(message.notes);
        active.replied_by = Set(message.replied_by);
        active.replied_at = Set(message.replied_at);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(ContactMessage::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = ContactEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
