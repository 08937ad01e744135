//! Repository layer - Data access abstraction
//!
//! One repository per platform table, each behind a trait so services
//! can be exercised against mocks or in-memory fakes.

mod activity_repository;
mod contact_repository;
pub(crate) mod entities;
mod profile_repository;
mod timeline_repository;

pub use activity_repository::{ActivityRepository, ActivityStore};
pub use contact_repository::{ContactRepository, ContactStore};
pub use profile_repository::{ProfileRepository, ProfileStore};
pub use timeline_repository::{TimelineRepository, TimelineStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use activity_repository::MockActivityRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use contact_repository::MockContactRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use profile_repository::MockProfileRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use timeline_repository::MockTimelineRepository;
