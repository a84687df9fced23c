//! Embedded schema migrations.
//!
//! Migrations are compiled into the binary and applied over a blocking
//! `PgConnection` on the Tokio blocking pool.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// The migration connection could not be opened.
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    /// The blocking migration task panicked or was cancelled.
    #[error("migration task aborted: {message}")]
    Aborted { message: String },
}

/// Apply every pending migration against `database_url`.
///
/// Returns the versions applied during this call.
pub async fn run_pending_migrations(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let database_url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || apply_blocking(&database_url))
        .await
        .map_err(|err| MigrationError::Aborted {
            message: err.to_string(),
        })??;
    info!(count = applied.len(), versions = ?applied, "database migrations applied");
    Ok(applied)
}

fn apply_blocking(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut connection =
        PgConnection::establish(database_url).map_err(|err| MigrationError::Connect {
            message: err.to_string(),
        })?;
    let versions = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    Ok(versions.iter().map(ToString::to_string).collect())
}
