//! Unit of Work: centralized repository access.
//!
//! Every content action is a single table statement, so the hub only hands
//! out repositories; nothing here spans more than one table.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    ActivityRepository, ActivityStore, ContactRepository, ContactStore, ProfileRepository,
    ProfileStore, TimelineRepository, TimelineStore,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Unit of Work trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait UnitOfWork: Send + Sync {
    fn profiles(&self) -> Arc<dyn ProfileRepository>;

    fn activities(&self) -> Arc<dyn ActivityRepository>;

    fn timeline(&self) -> Arc<dyn TimelineRepository>;

    fn contacts(&self) -> Arc<dyn ContactRepository>;
}

/// Concrete implementation of UnitOfWork over one database connection
pub struct Persistence {
    profiles: Arc<ProfileStore>,
    activities: Arc<ActivityStore>,
    timeline: Arc<TimelineStore>,
    contacts: Arc<ContactStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            profiles: Arc::new(ProfileStore::new(db.clone())),
            activities: Arc::new(ActivityStore::new(db.clone())),
            timeline: Arc::new(TimelineStore::new(db.clone())),
            contacts: Arc::new(ContactStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn profiles(&self) -> Arc<dyn ProfileRepository> {
        self.profiles.clone()
    }

    fn activities(&self) -> Arc<dyn ActivityRepository> {
        self.activities.clone()
    }

    fn timeline(&self) -> Arc<dyn TimelineRepository> {
        self.timeline.clone()
    }

    fn contacts(&self) -> Arc<dyn ContactRepository> {
        self.contacts.clone()
    }
}
