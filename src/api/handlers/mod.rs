//! HTTP request handlers.

pub mod activity_handler;
pub mod admin_handler;
pub mod auth_handler;
pub mod contact_handler;
pub mod public_handler;
pub mod timeline_handler;
pub mod upload_handler;

pub use activity_handler::activity_routes;
pub use admin_handler::admin_routes;
pub use auth_handler::auth_routes;
pub use contact_handler::contact_routes;
pub use public_handler::public_routes;
pub use timeline_handler::timeline_routes;
pub use upload_handler::upload_routes;
