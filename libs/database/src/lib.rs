//! Database library providing the SQLite connector used by the Products API
//!
//! # Features
//!
//! - `sqlite` (default) - SQLite support through SeaORM (`sqlx-sqlite`)
//! - `config` - Configuration support with `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::sqlite::{self, SqliteConfig};
//! use migration::Migrator;
//!
//! let config = SqliteConfig::new("sqlite://./products.db");
//! let db = sqlite::connect_from_config_with_retry(config, None).await?;
//! sqlite::run_migrations::<Migrator>(&db, "products_api").await?;
//! ```

pub mod common;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use common::DatabaseError;
