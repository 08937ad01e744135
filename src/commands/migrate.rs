//! Migrate command - manage the site tables in the platform database.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::db::{table_for, SITE_TABLES};
use crate::infra::Database;

fn db_error(e: sea_orm::DbErr) -> AppError {
    AppError::internal(format!("Migration failed: {}", e))
}

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::open(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    match args.action {
        MigrateAction::Up => {
            let created = db.apply_pending().await.map_err(db_error)?;
            if created.is_empty() {
                println!("Site tables are up to date");
            }
            for name in created {
                println!("created {} ({})", table_for(&name).unwrap_or("-"), name);
            }
        }
        MigrateAction::Down => match db.rollback_last().await.map_err(db_error)? {
            Some(name) => {
                tracing::warn!(migration = %name, "Rolled back migration");
                println!("dropped {} ({})", table_for(&name).unwrap_or("-"), name);
            }
            None => println!("Nothing to roll back"),
        },
        MigrateAction::Status => {
            for state in db.migration_states().await.map_err(db_error)? {
                println!("{}", state.describe());
            }
        }
        MigrateAction::Fresh { yes } => {
            if !yes {
                return Err(AppError::validation(format!(
                    "fresh drops {} with all admin profiles and content; repeat with --yes",
                    SITE_TABLES.join(", ")
                )));
            }
            tracing::warn!("Dropping and recreating site tables");
            db.recreate().await.map_err(db_error)?;
            println!("Recreated {}", SITE_TABLES.join(", "));
        }
    }

    Ok(())
}
