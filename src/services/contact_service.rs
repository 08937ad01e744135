//! Contact form submissions and the dashboard inbox.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use domain::{ContactDraft, ContactMessage, ContactStatus};

#[async_trait]
pub trait ContactService: Send + Sync {
    /// Public submission, stored as unread
    async fn submit(&self, draft: ContactDraft) -> AppResult<ContactMessage>;

    /// Inbox in arrival order, optionally filtered by status
    async fn list(&self, status: Option<ContactStatus>) -> AppResult<Vec<ContactMessage>>;

    /// Mark a message read; returns the reloaded inbox
    async fn mark_read(&self, id: Uuid) -> AppResult<Vec<ContactMessage>>;

    /// Record a reply annotation; returns the reloaded inbox
    async fn reply(&self, actor: Uuid, id: Uuid, notes: String)
        -> AppResult<Vec<ContactMessage>>;

    /// Hard delete; returns the reloaded inbox
    async fn delete(&self, id: Uuid) -> AppResult<Vec<ContactMessage>>;
}

pub struct ContactManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ContactManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn find(&self, id: Uuid) -> AppResult<ContactMessage> {
        self.uow.contacts().find_by_id(id).await?.ok_or_not_found()
    }
}

#[async_trait]
impl<U: UnitOfWork> ContactService for ContactManager<U> {
    async fn submit(&self, draft: ContactDraft) -> AppResult<ContactMessage> {
        let draft = draft.validate()?;
        let message = self.uow.contacts().create(draft).await?;
        tracing::info!(message_id = %message.id, "Contact message received");
        Ok(message)
    }

    async fn list(&self, status: Option<ContactStatus>) -> AppResult<Vec<ContactMessage>> {
        self.uow.contacts().list(status).await
    }

    async fn mark_read(&self, id: Uuid) -> AppResult<Vec<ContactMessage>> {
        let current = self.find(id).await?;
        let next = current.mark_read();
        if next != current {
            self.uow.contacts().update_status(next).await?;
        }
        self.list(None).await
    }

    async fn reply(
        &self,
        actor: Uuid,
        id: Uuid,
        notes: String,
    ) -> AppResult<Vec<ContactMessage>> {
        let current = self.find(id).await?;
        let next = current.reply(&notes, actor, Utc::now())?;
        self.uow.contacts().update_status(next).await?;
        tracing::info!(message_id = %id, %actor, "Contact message replied");
        self.list(None).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<Vec<ContactMessage>> {
        self.uow.contacts().delete(id).await?;
        tracing::info!(message_id = %id, "Contact message deleted");
        self.list(None).await
    }
}
