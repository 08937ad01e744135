//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain rules and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, and reach tables through the Unit of Work.

mod activity_service;
mod admin_service;
mod auth_service;
mod contact_service;
pub mod container;
mod dashboard_service;
mod gate_service;
mod timeline_service;
mod upload_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use activity_service::{ActivityDetail, ActivityManager, ActivityService};
pub use admin_service::{AdminManager, AdminService, ProfileListing, RoleCounts, StatusCounts};
pub use auth_service::{
    AuthService, Authenticator, LoginResponse, Registration, SessionResponse,
};
pub use contact_service::{ContactManager, ContactService};
pub use dashboard_service::{DashboardReporter, DashboardService, DashboardStats};
pub use gate_service::{AccessGate, CurrentAdmin, GateService};
pub use timeline_service::{TimelineManager, TimelineService};
pub use upload_service::{ImageUpload, ImageUploader, UploadService, UploadedImage};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use upload_service::MockUploadService;
