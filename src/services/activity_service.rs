//! Activities: public listing and detail, dashboard CRUD with thumbnails.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::upload_service::{ImageUpload, UploadService};
use super::CurrentAdmin;
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use domain::activity::{check_thumbnail, related};
use domain::{
    ensure_public_url, Activity, ActivityDraft, DomainError, RELATED_ACTIVITIES_LIMIT,
};

/// Public activity page
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActivityDetail {
    pub activity: Activity,
    pub related: Vec<Activity>,
}

#[async_trait]
pub trait ActivityService: Send + Sync {
    /// Active activities for the public site
    async fn list_public(&self) -> AppResult<Vec<Activity>>;

    /// One active activity with related ones; inactive rows are not found
    async fn detail(&self, id: Uuid) -> AppResult<ActivityDetail>;

    /// Every activity, for the dashboard
    async fn list_all(&self) -> AppResult<Vec<Activity>>;

    /// Create an activity; a thumbnail is mandatory
    async fn create(
        &self,
        admin: &CurrentAdmin,
        draft: ActivityDraft,
        image: Option<ImageUpload>,
    ) -> AppResult<Activity>;

    /// Overwrite an activity; without a new image the stored one is kept
    async fn update(
        &self,
        admin: &CurrentAdmin,
        id: Uuid,
        draft: ActivityDraft,
        image: Option<ImageUpload>,
    ) -> AppResult<Activity>;

    /// Delete and return the reloaded dashboard list
    async fn delete(&self, id: Uuid) -> AppResult<Vec<Activity>>;
}

pub struct ActivityManager<U: UnitOfWork> {
    uow: Arc<U>,
    uploads: Arc<dyn UploadService>,
}

impl<U: UnitOfWork> ActivityManager<U> {
    pub fn new(uow: Arc<U>, uploads: Arc<dyn UploadService>) -> Self {
        Self { uow, uploads }
    }

    /// Upload a validated image and return its public URL.
    async fn store_image(&self, admin: &CurrentAdmin, image: ImageUpload) -> AppResult<String> {
        let uploaded = self.uploads.upload_image(&admin.access_token, image).await?;
        ensure_public_url(&uploaded.url)?;
        Ok(uploaded.url)
    }
}

#[async_trait]
impl<U: UnitOfWork> ActivityService for ActivityManager<U> {
    async fn list_public(&self) -> AppResult<Vec<Activity>> {
        self.uow.activities().list(true).await
    }

    async fn detail(&self, id: Uuid) -> AppResult<ActivityDetail> {
        let activity = self
            .uow
            .activities()
            .find_by_id(id)
            .await?
            .filter(Activity::is_public)
            .ok_or_not_found()?;

        let all = self.uow.activities().list(true).await?;
        let related = related(&all, id, RELATED_ACTIVITIES_LIMIT);

        Ok(ActivityDetail { activity, related })
    }

    async fn list_all(&self) -> AppResult<Vec<Activity>> {
        self.uow.activities().list(false).await
    }

    async fn create(
        &self,
        admin: &CurrentAdmin,
        draft: ActivityDraft,
        image: Option<ImageUpload>,
    ) -> AppResult<Activity> {
        let draft = draft.validate()?;
        let image = image.ok_or_else(|| {
            DomainError::validation("image_file", "A thumbnail image is required for a new activity")
        })?;
        image.meta.validate()?;

        let image_url = self.store_image(admin, image).await?;
        let created = self
            .uow
            .activities()
            .create(draft, image_url, admin.id())
            .await?;

        tracing::info!(activity_id = %created.id, admin = %admin.id(), "Activity created");
        Ok(created)
    }

    async fn update(
        &self,
        admin: &CurrentAdmin,
        id: Uuid,
        draft: ActivityDraft,
        image: Option<ImageUpload>,
    ) -> AppResult<Activity> {
        let draft = draft.validate()?;
        let existing = self.uow.activities().find_by_id(id).await?.ok_or_not_found()?;
        check_thumbnail(existing.image_url.as_deref(), image.is_some())?;

        let image_url = match image {
            Some(image) => {
                image.meta.validate()?;
                Some(self.store_image(admin, image).await?)
            }
            None => None,
        };

        let updated = self
            .uow
            .activities()
            .update(id, draft, image_url, admin.id())
            .await?;

        tracing::info!(activity_id = %id, admin = %admin.id(), "Activity updated");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<Vec<Activity>> {
        self.uow.activities().delete(id).await?;
        tracing::info!(activity_id = %id, "Activity deleted");
        self.list_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::{ActivityRepository, MockActivityRepository, MockUnitOfWork};
    use crate::services::upload_service::{MockUploadService, UploadedImage};
    use chrono::Utc;
    use domain::{ActivityStatus, Profile, ProfileStatus, Role};

    fn admin() -> CurrentAdmin {
        CurrentAdmin {
            profile: Profile {
                id: Uuid::new_v4(),
                profile_id: 1,
                full_name: Some("Admin".into()),
                email: "admin@example.com".into(),
                role: Role::Admin,
                status: ProfileStatus::Active,
                is_approved: true,
                reason: None,
                created_at: Utc::now(),
                updated_at: None,
                approved_at: None,
                approved_by: None,
                rejected_at: None,
                suspended_at: None,
            },
            access_token: "token".into(),
        }
    }

    fn draft() -> ActivityDraft {
        ActivityDraft {
            title: "Kajian Rutin".into(),
            description: "Weekly study circle for members".into(),
            ..Default::default()
        }
    }

    fn activity(id: Uuid, draft: ActivityDraft, image_url: Option<String>) -> Activity {
        Activity {
            id,
            title: draft.title,
            description: draft.description,
            content: draft.content,
            image_url,
            status: draft.status,
            category: draft.category,
            tags: draft.tags,
            registration_link: draft.registration_link,
            order_index: draft.order_index,
            created_by: None,
            created_at: Utc::now(),
            updated_by: None,
            updated_at: None,
        }
    }

    fn manager(
        repo: MockActivityRepository,
        uploads: MockUploadService,
    ) -> ActivityManager<MockUnitOfWork> {
        let repo: Arc<dyn ActivityRepository> = Arc::new(repo);
        let mut uow = MockUnitOfWork::new();
        uow.expect_activities().returning(move || repo.clone());
        ActivityManager::new(Arc::new(uow), Arc::new(uploads))
    }

    #[tokio::test]
    async fn test_create_without_image_rejected_before_network() {
        let mut repo = MockActivityRepository::new();
        repo.expect_create().never();
        let mut uploads = MockUploadService::new();
        uploads.expect_upload_image().never();

        let err = manager(repo, uploads)
            .create(&admin(), draft(), None)
            .await
            .unwrap_err();
        assert_eq!(err.field(), Some("image_file"));
    }

    #[tokio::test]
    async fn test_create_with_oversized_image_rejected_before_upload() {
        let mut repo = MockActivityRepository::new();
        repo.expect_create().never();
        let mut uploads = MockUploadService::new();
        uploads.expect_upload_image().never();

        let image = ImageUpload::new("big.png".into(), "image/png".into(), vec![0; 3 * 1024 * 1024]);
        let err = manager(repo, uploads)
            .create(&admin(), draft(), Some(image))
            .await
            .unwrap_err();
        assert!(err.user_message().contains("too large"));
    }

    #[tokio::test]
    async fn test_create_persists_uploaded_url() {
        let mut uploads = MockUploadService::new();
        uploads.expect_upload_image().returning(|_, image| {
            Ok(UploadedImage {
                url: "https://cdn.example.com/activity-images/1-abc.png".into(),
                path: "activity-images/1-abc.png".into(),
                file_name: "1-abc.png".into(),
                file_size: image.meta.size,
            })
        });

        let mut repo = MockActivityRepository::new();
        repo.expect_create()
            .withf(|_, url, _| url.starts_with("https://"))
            .returning(|d, url, _| Ok(activity(Uuid::new_v4(), d, Some(url))));

        let image = ImageUpload::new("poster.png".into(), "image/png".into(), vec![1; 512]);
        let created = manager(repo, uploads)
            .create(&admin(), draft(), Some(image))
            .await
            .unwrap();
        assert_eq!(
            created.image_url.as_deref(),
            Some("https://cdn.example.com/activity-images/1-abc.png")
        );
    }

    #[tokio::test]
    async fn test_upload_failure_saves_nothing() {
        let mut uploads = MockUploadService::new();
        uploads
            .expect_upload_image()
            .returning(|_, _| Err(AppError::Upload("bucket missing".into())));
        let mut repo = MockActivityRepository::new();
        repo.expect_create().never();

        let image = ImageUpload::new("poster.png".into(), "image/png".into(), vec![1; 512]);
        let err = manager(repo, uploads)
            .create(&admin(), draft(), Some(image))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upload(_)));
    }

    #[tokio::test]
    async fn test_update_without_image_keeps_existing() {
        let id = Uuid::new_v4();
        let mut repo = MockActivityRepository::new();
        repo.expect_find_by_id().returning(move |_| {
            Ok(Some(activity(
                id,
                draft(),
                Some("https://cdn.example.com/old.png".into()),
            )))
        });
        repo.expect_update()
            .withf(|_, _, url, _| url.is_none())
            .returning(|id, d, _, _| {
                Ok(activity(id, d, Some("https://cdn.example.com/old.png".into())))
            });
        let mut uploads = MockUploadService::new();
        uploads.expect_upload_image().never();

        let mut edited = draft();
        edited.title = "Kajian Akbar".into();
        let updated = manager(repo, uploads)
            .update(&admin(), id, edited, None)
            .await
            .unwrap();
        assert_eq!(updated.title, "Kajian Akbar");
        assert_eq!(updated.image_url.as_deref(), Some("https://cdn.example.com/old.png"));
    }

    #[tokio::test]
    async fn test_detail_hides_inactive_activity() {
        let id = Uuid::new_v4();
        let mut repo = MockActivityRepository::new();
        repo.expect_find_by_id().returning(move |_| {
            let mut d = draft();
            d.status = ActivityStatus::Inactive;
            Ok(Some(activity(id, d, None)))
        });

        let err = manager(repo, MockUploadService::new())
            .detail(id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_returns_reloaded_list() {
        let mut repo = MockActivityRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(()));
        repo.expect_list()
            .withf(|only_active| !*only_active)
            .times(1)
            .returning(|_| Ok(vec![]));

        let remaining = manager(repo, MockUploadService::new())
            .delete(Uuid::new_v4())
            .await
            .unwrap();
        assert!(remaining.is_empty());
    }
}
