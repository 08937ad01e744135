//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Cache, Database};
use crate::services::{ServiceContainer, Services};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// All application services
    pub services: Arc<dyn ServiceContainer>,
    /// Redis counters for rate limiting; `None` disables rate limiting
    pub cache: Option<Arc<Cache>>,
    /// Database handle for health checks
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state from a live database, cache and config.
    pub fn from_config(database: Arc<Database>, cache: Arc<Cache>, config: &Config) -> Self {
        let services = Arc::new(Services::from_config(database.get_connection(), config));

        Self {
            services,
            cache: Some(cache),
            database: Some(database),
        }
    }

    /// Create state around an already-built container, without infrastructure handles.
    pub fn new(services: Arc<dyn ServiceContainer>) -> Self {
        Self {
            services,
            cache: None,
            database: None,
        }
    }

    pub fn with_cache(mut self, cache: Arc<Cache>) -> Self {
        self.cache = Some(cache);
        self
    }
}
