//! Service Container - Centralized service access.
//!
//! Every platform capability is constructed once and passed in; no service
//! builds its own client.

use std::sync::Arc;

use super::{
    AccessGate, ActivityManager, ActivityService, AdminManager, AdminService, AuthService,
    Authenticator, ContactManager, ContactService, DashboardReporter, DashboardService,
    GateService, ImageUploader, TimelineManager, TimelineService, UploadService,
};
use crate::config::Config;
use crate::infra::{
    IdentityProvider, ObjectStorage, Persistence, PlatformIdentity, PlatformStorage, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Auth gate for admin routes
    fn gate(&self) -> Arc<dyn GateService>;

    fn admins(&self) -> Arc<dyn AdminService>;

    fn activities(&self) -> Arc<dyn ActivityService>;

    fn timeline(&self) -> Arc<dyn TimelineService>;

    fn contacts(&self) -> Arc<dyn ContactService>;

    fn uploads(&self) -> Arc<dyn UploadService>;

    fn dashboard(&self) -> Arc<dyn DashboardService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    gate_service: Arc<dyn GateService>,
    admin_service: Arc<dyn AdminService>,
    activity_service: Arc<dyn ActivityService>,
    timeline_service: Arc<dyn TimelineService>,
    contact_service: Arc<dyn ContactService>,
    upload_service: Arc<dyn UploadService>,
    dashboard_service: Arc<dyn DashboardService>,
}

impl Services {
    /// Wire every service over one table store and the platform capabilities
    pub fn from_parts<U: UnitOfWork + 'static>(
        uow: Arc<U>,
        identity: Arc<dyn IdentityProvider>,
        storage: Arc<dyn ObjectStorage>,
        bucket: String,
    ) -> Self {
        let upload_service: Arc<dyn UploadService> = Arc::new(ImageUploader::new(storage, bucket));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), identity.clone())),
            gate_service: Arc::new(AccessGate::new(uow.clone(), identity)),
            admin_service: Arc::new(AdminManager::new(uow.clone())),
            activity_service: Arc::new(ActivityManager::new(uow.clone(), upload_service.clone())),
            timeline_service: Arc::new(TimelineManager::new(uow.clone())),
            contact_service: Arc::new(ContactManager::new(uow.clone())),
            dashboard_service: Arc::new(DashboardReporter::new(uow)),
            upload_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_config(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        Self::from_parts(
            Arc::new(Persistence::new(db)),
            Arc::new(PlatformIdentity::new(config)),
            Arc::new(PlatformStorage::new(config)),
            config.storage_bucket.clone(),
        )
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn gate(&self) -> Arc<dyn GateService> {
        self.gate_service.clone()
    }

    fn admins(&self) -> Arc<dyn AdminService> {
        self.admin_service.clone()
    }

    fn activities(&self) -> Arc<dyn ActivityService> {
        self.activity_service.clone()
    }

    fn timeline(&self) -> Arc<dyn TimelineService> {
        self.timeline_service.clone()
    }

    fn contacts(&self) -> Arc<dyn ContactService> {
        self.contact_service.clone()
    }

    fn uploads(&self) -> Arc<dyn UploadService> {
        self.upload_service.clone()
    }

    fn dashboard(&self) -> Arc<dyn DashboardService> {
        self.dashboard_service.clone()
    }
}
