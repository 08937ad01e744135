//! Organization timeline.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::infra::UnitOfWork;
use domain::{TimelineDraft, TimelineItem};

#[async_trait]
pub trait TimelineService: Send + Sync {
    /// All items, newest date first
    async fn list(&self) -> AppResult<Vec<TimelineItem>>;

    /// Validate and insert; returns the reloaded list
    async fn create(&self, draft: TimelineDraft) -> AppResult<Vec<TimelineItem>>;

    /// Overwrite the editable fields; returns the reloaded list
    async fn update(&self, id: Uuid, draft: TimelineDraft) -> AppResult<Vec<TimelineItem>>;

    /// Hard delete; returns the reloaded list
    async fn delete(&self, id: Uuid) -> AppResult<Vec<TimelineItem>>;
}

pub struct TimelineManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TimelineManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> TimelineService for TimelineManager<U> {
    async fn list(&self) -> AppResult<Vec<TimelineItem>> {
        self.uow.timeline().list().await
    }

    async fn create(&self, draft: TimelineDraft) -> AppResult<Vec<TimelineItem>> {
        let fields = draft.validate()?;
        let item = self.uow.timeline().create(fields).await?;
        tracing::info!(timeline_id = %item.id, date = %item.date, "Timeline item created");
        self.list().await
    }

    async fn update(&self, id: Uuid, draft: TimelineDraft) -> AppResult<Vec<TimelineItem>> {
        let fields = draft.validate()?;
        self.uow.timeline().update(id, fields).await?;
        tracing::info!(timeline_id = %id, "Timeline item updated");
        self.list().await
    }

    async fn delete(&self, id: Uuid) -> AppResult<Vec<TimelineItem>> {
        self.uow.timeline().delete(id).await?;
        tracing::info!(timeline_id = %id, "Timeline item deleted");
        self.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockTimelineRepository, MockUnitOfWork, TimelineRepository};
    use chrono::{NaiveDate, Utc};

    fn manager(repo: MockTimelineRepository) -> TimelineManager<MockUnitOfWork> {
        let repo: Arc<dyn TimelineRepository> = Arc::new(repo);
        let mut uow = MockUnitOfWork::new();
        uow.expect_timeline().returning(move || repo.clone());
        TimelineManager::new(Arc::new(uow))
    }

    #[tokio::test]
    async fn test_create_rejects_bad_date_without_write() {
        let mut repo = MockTimelineRepository::new();
        repo.expect_create().never();

        let err = manager(repo)
            .create(TimelineDraft {
                title: "Launch".into(),
                date: "01/01/2024".into(),
                description: "Kickoff event".into(),
                tags: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.field(), Some("date"));
    }

    #[tokio::test]
    async fn test_create_returns_reloaded_list() {
        let mut repo = MockTimelineRepository::new();
        repo.expect_create()
            .withf(|f| f.date == NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() && f.tags.is_none())
            .returning(|f| {
                Ok(TimelineItem {
                    id: Uuid::new_v4(),
                    title: f.title,
                    date: f.date,
                    description: f.description,
                    tags: f.tags,
                    created_at: Utc::now(),
                })
            });
        repo.expect_list().times(1).returning(|| Ok(vec![]));

        let items = manager(repo)
            .create(TimelineDraft {
                title: "Launch".into(),
                date: "2024-01-01".into(),
                description: "Kickoff event".into(),
                tags: None,
            })
            .await
            .unwrap();
        assert!(items.is_empty());
    }
}
