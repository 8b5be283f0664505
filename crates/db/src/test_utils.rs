//! Test utilities for database operations.
//!
//! Provides an in-memory `SQLite` database with the schema already migrated,
//! so repository and service tests can run against a real engine without any
//! external service.

use std::sync::Arc;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::migrations::Migrator;

/// In-memory database URL.
pub const IN_MEMORY_URL: &str = "sqlite::memory:";

/// A migrated, throwaway database.
pub struct TestDatabase {
    /// Database connection.
    pub conn: Arc<DatabaseConnection>,
}

impl TestDatabase {
    /// Create a fresh in-memory database and run all migrations.
    ///
    /// Each `sqlite::memory:` connection is its own database, so the pool is
    /// pinned to exactly one connection.
    pub async fn in_memory() -> Result<Self, DbErr> {
        let mut opt = ConnectOptions::new(IN_MEMORY_URL);
        opt.max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;
        Migrator::up(&conn, None).await?;

        info!("Created in-memory test database");

        Ok(Self {
            conn: Arc::new(conn),
        })
    }

    /// Shared handle to the connection, as repositories expect it.
    #[must_use]
    pub fn connection(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.conn)
    }
}
