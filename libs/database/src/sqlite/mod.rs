//! SQLite database connector and utilities
//!
//! Provides connection management, migration running, and health checks.

mod config;
mod connector;
mod health;

pub use config::SqliteConfig;
pub use connector::{connect_from_config, connect_from_config_with_retry, run_migrations};
pub use health::check_health;
