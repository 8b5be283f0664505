//! Database layer for wyr.
//!
//! Owns all persisted poll state. Other crates reach the `poll` table only
//! through [`repositories::PollRepository`].

pub mod entities;
pub mod migrations;
pub mod repositories;
pub mod test_utils;

use sea_orm::{
    ConnectOptions, Database, DatabaseConnection,
    sqlx::sqlite::{SqliteJournalMode, SqliteSynchronous},
};
use std::time::Duration;
use tracing::log::LevelFilter;
use wyr_common::{AppError, Config};

/// How long a pooled `SQLite` connection waits on a locked database before
/// the statement fails with `SQLITE_BUSY`.
const SQLITE_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Initialize database connection.
///
/// For `SQLite` URLs every pooled connection runs in WAL mode with a busy
/// timeout: concurrent writers queue on the write lock instead of failing.
/// Other backends ignore these settings.
pub async fn init(config: &Config) -> Result<DatabaseConnection, AppError> {
    let mut opt = ConnectOptions::new(&config.database.url);

    opt.max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug)
        .map_sqlx_sqlite_opts(|opts| {
            opts.journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .busy_timeout(SQLITE_BUSY_TIMEOUT)
        });

    Database::connect(opt)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Run pending migrations.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), AppError> {
    use sea_orm_migration::MigratorTrait;
    migrations::Migrator::up(db, None)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{ConnectionTrait, Statement};
    use wyr_common::config::{AdminConfig, DatabaseConfig, ServerConfig};

    #[tokio::test]
    async fn test_init_enables_wal_for_sqlite_files() {
        let path = std::env::temp_dir().join(format!("wyr-init-{}.db", std::process::id()));
        let config = Config {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: format!("sqlite://{}?mode=rwc", path.display()),
                max_connections: 2,
                min_connections: 1,
            },
            admin: AdminConfig::default(),
        };

        let db = init(&config).await.unwrap();
        let row = db
            .query_one(Statement::from_string(
                db.get_database_backend(),
                "PRAGMA journal_mode".to_string(),
            ))
            .await
            .unwrap()
            .unwrap();
        let mode: String = row.try_get("", "journal_mode").unwrap();
        db.close().await.unwrap();
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
        }

        assert_eq!(mode.to_lowercase(), "wal");
    }
}
