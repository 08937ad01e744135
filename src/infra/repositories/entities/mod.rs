//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod activity;
pub mod contact_message;
pub mod profile;
pub mod timeline;
