//! Platform Postgres connection and site schema management.
//!
//! The site owns four tables inside the platform database; each has one
//! creating migration, so migration state maps directly onto table state.

use std::collections::HashSet;

use sea_orm::{
    ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
    Statement,
};
use sea_orm_migration::{seaql_migrations, MigratorTrait};

use crate::config::Config;

pub mod migrations;

pub use migrations::Migrator;

/// Tables owned by the site, in creation order
pub const SITE_TABLES: [&str; 4] = ["profiles", "activities", "timeline", "contact_messages"];

/// Table created by a `m..._create_<table>_table` migration.
pub fn table_for(migration: &str) -> Option<&'static str> {
    SITE_TABLES
        .iter()
        .copied()
        .find(|table| migration.ends_with(&format!("_create_{}_table", table)))
}

/// One migration and whether the database has it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

impl MigrationState {
    pub fn table(&self) -> Option<&'static str> {
        table_for(&self.name)
    }

    /// `contact_messages  present  m20240101_000004_...`
    pub fn describe(&self) -> String {
        format!(
            "{:<18} {:<8} {}",
            self.table().unwrap_or("-"),
            if self.applied { "present" } else { "missing" },
            self.name
        )
    }
}

/// Handle on the platform database
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Connect and bring the site tables up to date.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let db = Self::open(config).await?;

        let created = db.apply_pending().await.map_err(|e| {
            tracing::error!("Failed to create site tables: {}", e);
            e
        })?;
        if created.is_empty() {
            tracing::info!("Database connected, site tables up to date");
        } else {
            tracing::info!(migrations = ?created, "Database connected, site tables migrated");
        }

        Ok(db)
    }

    /// Connect without touching the schema.
    pub async fn open(config: &Config) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(&config.database_url).await?;
        Ok(Self { connection })
    }

    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Every known migration with its applied flag, oldest first.
    pub async fn migration_states(&self) -> Result<Vec<MigrationState>, DbErr> {
        let applied: HashSet<String> = seaql_migrations::Entity::find()
            .order_by_asc(seaql_migrations::Column::Version)
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        Ok(Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                MigrationState {
                    applied: applied.contains(&name),
                    name,
                }
            })
            .collect())
    }

    /// Apply pending migrations and return their names.
    pub async fn apply_pending(&self) -> Result<Vec<String>, DbErr> {
        let pending: Vec<String> = self
            .migration_states()
            .await?
            .into_iter()
            .filter(|m| !m.applied)
            .map(|m| m.name)
            .collect();

        if !pending.is_empty() {
            Migrator::up(&self.connection, None).await?;
        }
        Ok(pending)
    }

    /// Revert the newest applied migration, returning its name.
    pub async fn rollback_last(&self) -> Result<Option<String>, DbErr> {
        let last = self
            .migration_states()
            .await?
            .into_iter()
            .filter(|m| m.applied)
            .last()
            .map(|m| m.name);

        if last.is_some() {
            Migrator::down(&self.connection, Some(1)).await?;
        }
        Ok(last)
    }

    /// Drop every site table and recreate them empty.
    pub async fn recreate(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Round-trip to Postgres for health checks.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}
