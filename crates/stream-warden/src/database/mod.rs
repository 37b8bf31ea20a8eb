//! SQLite-backed database access
//!
//! Owns connection setup and schema creation. The schema is small enough
//! (two tables) that it is created straight from the entity definitions
//! instead of carrying a migration crate.

use anyhow::{Context, Result};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaOrmDatabase, DatabaseConnection, Schema,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::entities::prelude::{StreamEvents, Streams};

/// Database connection manager
#[derive(Clone)]
pub struct Database {
    pub connection: Arc<DatabaseConnection>,
}

impl Database {
    /// Open (and create, for SQLite file URLs) the configured database
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let connection_url = Self::ensure_sqlite_auto_creation(&config.url)?;

        let mut connect_options = ConnectOptions::new(&connection_url);
        connect_options
            .max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(5))
            .acquire_timeout(Duration::from_secs(3))
            .sqlx_logging(false);

        let connection = SeaOrmDatabase::connect(connect_options)
            .await
            .with_context(|| format!("Failed to connect to database at '{}'", config.url))?;

        debug!("Database connection established");

        Ok(Self {
            connection: Arc::new(connection),
        })
    }

    /// Create missing tables from the entity definitions
    pub async fn migrate(&self) -> Result<()> {
        let backend = self.connection.get_database_backend();
        let schema = Schema::new(backend);

        let mut streams_table = schema.create_table_from_entity(Streams);
        streams_table.if_not_exists();
        self.connection.execute(backend.build(&streams_table)).await?;

        let mut events_table = schema.create_table_from_entity(StreamEvents);
        events_table.if_not_exists();
        self.connection.execute(backend.build(&events_table)).await?;

        info!("Database schema is up to date");
        Ok(())
    }

    /// Ensure SQLite URLs carry the read-write-create mode so a missing
    /// database file is created instead of failing the connect.
    fn ensure_sqlite_auto_creation(url: &str) -> Result<String> {
        if !url.starts_with("sqlite:") {
            anyhow::bail!("Unsupported database URL format: {}", url);
        }
        if url.contains("mode=") || url.contains(":memory:") {
            return Ok(url.to_string());
        }
        let separator = if url.contains('?') { '&' } else { '?' };
        Ok(format!("{url}{separator}mode=rwc"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_file_urls_gain_rwc_mode() {
        let url = Database::ensure_sqlite_auto_creation("sqlite://./warden.db").unwrap();
        assert_eq!(url, "sqlite://./warden.db?mode=rwc");
    }

    #[test]
    fn in_memory_and_moded_urls_are_untouched() {
        for url in ["sqlite::memory:", "sqlite://./warden.db?mode=rwc"] {
            assert_eq!(Database::ensure_sqlite_auto_creation(url).unwrap(), url);
        }
    }

    #[test]
    fn non_sqlite_urls_are_rejected() {
        assert!(Database::ensure_sqlite_auto_creation("postgres://x/y").is_err());
    }
}
