use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::path::Path;
use tracing::{debug, info};

use super::SqliteConfig;
use crate::common::{RetryConfig, retry, retry_with_backoff};

/// Connect using a SqliteConfig
///
/// The parent directory of a file-backed database is created first.
///
/// With FromEnv (requires `config` feature):
/// ```ignore
/// use database::sqlite::{SqliteConfig, connect_from_config};
/// use core_config::FromEnv;
///
/// let config = SqliteConfig::from_env()?;
/// let db = connect_from_config(config).await?;
/// ```
pub async fn connect_from_config(config: SqliteConfig) -> Result<DatabaseConnection, DbErr> {
    if let Some(path) = config.database_path() {
        ensure_parent_dir(&path)
            .map_err(|e| DbErr::Custom(format!("cannot prepare {}: {}", path.display(), e)))?;
    }
    connect_with_options(config.into_connect_options()).await
}

async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!("Successfully connected to SQLite database");
    Ok(db)
}

/// Connect from config with automatic retry on failure
///
/// ```ignore
/// use database::common::RetryConfig;
/// use database::sqlite::{SqliteConfig, connect_from_config_with_retry};
///
/// let config = SqliteConfig::new("sqlite://./products.db");
/// let db = connect_from_config_with_retry(config, Some(RetryConfig::new().with_max_retries(5))).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: SqliteConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    let attempt = || connect_from_config(config.clone());

    match retry_config {
        Some(retry_config) => retry_with_backoff(attempt, retry_config).await,
        None => retry(attempt).await,
    }
}

/// Run database migrations using the provided Migrator
///
/// Migrations that were already applied are skipped, so this is safe to call
/// on every start.
///
/// ```ignore
/// use migration::Migrator;
/// use database::sqlite::run_migrations;
///
/// run_migrations::<Migrator>(&db, "products_api").await?;
/// ```
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!("Running {} database migrations...", app_name);
    M::up(db, None).await?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            debug!(dir = %parent.display(), "Creating database directory");
            std::fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}
