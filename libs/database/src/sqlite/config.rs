use sea_orm::ConnectOptions;
use std::path::PathBuf;
use std::time::Duration;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};

/// Used when `DATABASE_URL` is not set: a file next to the working directory.
const DEFAULT_DATABASE_URL: &str = "sqlite://./products.db";

const MEMORY_URL: &str = "sqlite::memory:";

/// SQLite database configuration
///
/// The URL is normalised on construction, so any of these are accepted:
/// `sqlite://path`, `sqlite:///path`, `sqlite:path`, `file:path?opts`, a bare
/// filesystem path, or `sqlite::memory:`. File URLs always open with
/// `mode=rwc` so a missing database file is created.
///
/// ```ignore
/// use database::sqlite::SqliteConfig;
///
/// let config = SqliteConfig::new("file:data/products.db?cache=shared");
/// assert_eq!(config.url(), "sqlite://data/products.db?mode=rwc");
/// ```
#[derive(Clone, Debug)]
pub struct SqliteConfig {
    url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,

    /// Log every SQL statement through sqlx
    pub sqlx_logging: bool,
}

impl SqliteConfig {
    pub fn new(url: impl AsRef<str>) -> Self {
        Self {
            url: normalize_url(url.as_ref()),
            ..Self::default()
        }
    }

    /// A private in-memory database. The pool is pinned to one connection
    /// because every SQLite `:memory:` connection is a separate database.
    pub fn in_memory() -> Self {
        Self::new(MEMORY_URL)
    }

    /// Normalised connection URL
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_in_memory(&self) -> bool {
        self.url == MEMORY_URL
    }

    /// Filesystem location of the database file, `None` for in-memory databases.
    pub fn database_path(&self) -> Option<PathBuf> {
        if self.is_in_memory() {
            return None;
        }
        let rest = self.url.strip_prefix("sqlite://")?;
        let path = rest.split('?').next().unwrap_or(rest);
        Some(PathBuf::from(path))
    }

    pub fn into_connect_options(self) -> ConnectOptions {
        let (max, min) = if self.is_in_memory() {
            (1, 1)
        } else {
            (self.max_connections, self.min_connections)
        };

        let mut opt = ConnectOptions::new(self.url);
        opt.max_connections(max)
            .min_connections(min)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .sqlx_logging(self.sqlx_logging);
        opt
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            url: normalize_url(DEFAULT_DATABASE_URL),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            sqlx_logging: false,
        }
    }
}

/// Load SqliteConfig from environment variables
///
/// - `DATABASE_URL` (optional, default: `sqlite://./products.db`)
/// - `DB_MAX_CONNECTIONS` (optional, default: 5)
/// - `DB_MIN_CONNECTIONS` (optional, default: 1)
/// - `DB_CONNECT_TIMEOUT_SECS` (optional, default: 8)
/// - `DB_ACQUIRE_TIMEOUT_SECS` (optional, default: 8)
/// - `DB_SQLX_LOGGING` (optional, default: false)
#[cfg(feature = "config")]
impl FromEnv for SqliteConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let url = env_or_default("DATABASE_URL", DEFAULT_DATABASE_URL);

        Ok(Self {
            url: normalize_url(&url),
            max_connections: env_parse_or("DB_MAX_CONNECTIONS", defaults.max_connections)?,
            min_connections: env_parse_or("DB_MIN_CONNECTIONS", defaults.min_connections)?,
            connect_timeout_secs: env_parse_or(
                "DB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            acquire_timeout_secs: env_parse_or(
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout_secs,
            )?,
            sqlx_logging: env_parse_or("DB_SQLX_LOGGING", defaults.sqlx_logging)?,
        })
    }
}

fn normalize_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.contains(":memory:") {
        return MEMORY_URL.to_string();
    }

    let path = ["sqlite:///", "sqlite://", "sqlite:", "file:"]
        .iter()
        .find_map(|prefix| raw.strip_prefix(prefix))
        .unwrap_or(raw);
    let path = path.split('?').next().unwrap_or(path);

    format!("sqlite://{}?mode=rwc", path)
}
