//! KKMI Al-Khawarizmi site backend
//!
//! Serves the organization's public site content and the admin dashboard
//! used to run it. Identity, storage and tables live on a hosted platform;
//! this crate enforces the admin lifecycle and the auth gate on top.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **services**: Application use cases and business logic
//! - **infra**: Database, platform clients and Redis counters
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared request and response types
//! - **errors**: Centralized error handling
//!
//! Domain types and rules live in the `domain` workspace crate.
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use infra::Cache;
