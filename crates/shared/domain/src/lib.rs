//! Domain layer - Core business entities and rules.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! profiles and the dashboard access rule, the admin lifecycle transition
//! table, content drafts with their field validation, and image upload rules.

pub mod access;
pub mod activity;
pub mod constants;
pub mod contact;
pub mod error;
pub mod lifecycle;
pub mod profile;
pub mod timeline;
pub mod upload;

pub use access::{check_access, AccessDenial};
pub use activity::{Activity, ActivityDraft, ActivityStatus};
pub use constants::*;
pub use contact::{ContactDraft, ContactMessage, ContactStatus};
pub use error::{DomainError, DomainResult};
pub use lifecycle::{apply_edit, transition, LifecycleUpdate, ProfileAction};
pub use profile::{NewProfile, Profile, ProfileStatus, Role};
pub use timeline::{TimelineDraft, TimelineFields, TimelineItem};
pub use upload::{ensure_public_url, ImageMeta};
