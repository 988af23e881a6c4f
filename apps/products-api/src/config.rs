//! Configuration for Products API

use axum::http::HeaderValue;
use axum_helpers::parse_origins;
use core_config::{AppInfo, FromEnv, app_info, env_optional, server::ServerConfig};
use database::sqlite::SqliteConfig;
use eyre::WrapErr;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: SqliteConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// From `CORS_ALLOWED_ORIGIN`; empty means any origin is allowed
    pub cors_allowed_origins: Vec<HeaderValue>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = SqliteConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        let cors_allowed_origins = match env_optional("CORS_ALLOWED_ORIGIN") {
            Some(raw) => parse_origins(&raw).wrap_err("Invalid CORS_ALLOWED_ORIGIN value")?,
            None => Vec::new(),
        };

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            cors_allowed_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 5] = ["DATABASE_URL", "PORT", "HOST", "APP_ENV", "CORS_ALLOWED_ORIGIN"];

    #[test]
    fn test_defaults() {
        temp_env::with_vars_unset(VARS, || {
            let config = Config::from_env().unwrap();

            assert_eq!(config.app.name, "products_api");
            assert_eq!(config.database.url(), "sqlite://./products.db?mode=rwc");
            assert_eq!(config.server.port, 3001);
            assert_eq!(config.environment, Environment::Development);
            assert!(config.cors_allowed_origins.is_empty());
        });
    }

    #[test]
    fn test_custom_values() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("file:data/shop.db")),
                ("PORT", Some("8080")),
                ("APP_ENV", Some("production")),
                (
                    "CORS_ALLOWED_ORIGIN",
                    Some("http://localhost:3000,https://shop.example"),
                ),
            ],
            || {
                let config = Config::from_env().unwrap();

                assert_eq!(config.database.url(), "sqlite://data/shop.db?mode=rwc");
                assert_eq!(config.server.address(), "0.0.0.0:8080");
                assert!(config.environment.is_production());
                assert_eq!(config.cors_allowed_origins.len(), 2);
            },
        );
    }

    #[test]
    fn test_blank_cors_origin_allows_any_origin() {
        temp_env::with_var("CORS_ALLOWED_ORIGIN", Some("  "), || {
            let config = Config::from_env().unwrap();
            assert!(config.cors_allowed_origins.is_empty());
        });
    }

    #[test]
    fn test_invalid_cors_origin_is_an_error() {
        temp_env::with_var("CORS_ALLOWED_ORIGIN", Some("http://bad\norigin"), || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        temp_env::with_var("PORT", Some("not-a-port"), || {
            assert!(Config::from_env().is_err());
        });
    }
}
