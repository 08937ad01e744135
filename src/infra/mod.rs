//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection, migrations and repositories (platform table store)
//! - Platform identity and object storage clients
//! - Redis counters for rate limiting
//! - Unit of Work for centralized repository access

pub mod cache;
pub mod db;
pub mod platform;
pub mod repositories;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use platform::{
    IdentityProvider, IdentityUser, ObjectStorage, PlatformError, PlatformIdentity,
    PlatformResult, PlatformStorage, Session,
};
pub use repositories::{
    ActivityRepository, ContactRepository, ProfileRepository, TimelineRepository,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use platform::{MockIdentityProvider, MockObjectStorage};
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockActivityRepository, MockContactRepository, MockProfileRepository,
    MockTimelineRepository,
};
#[cfg(any(test, feature = "test-utils"))]
pub use unit_of_work::MockUnitOfWork;
