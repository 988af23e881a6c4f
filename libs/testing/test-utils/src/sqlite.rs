//! SQLite test infrastructure
//!
//! Every `TestDatabase` is a private in-memory SQLite database with the
//! workspace migrations applied, so tests never share state.

use database::sqlite::{SqliteConfig, connect_from_config, run_migrations};
use migration::Migrator;
use sea_orm::DatabaseConnection;

/// Migrated in-memory database, dropped with the struct
pub struct TestDatabase {
    pub connection: DatabaseConnection,
}

impl TestDatabase {
    /// Create a new test database with migrations applied
    ///
    /// ```no_run
    /// use test_utils::TestDatabase;
    ///
    /// # async fn example() {
    /// let db = TestDatabase::new().await;
    /// // Use db.connection() to create your repository
    /// # }
    /// ```
    pub async fn new() -> Self {
        let connection = connect_from_config(SqliteConfig::in_memory())
            .await
            .expect("Failed to open in-memory SQLite database");

        run_migrations::<Migrator>(&connection, "test-utils")
            .await
            .expect("Failed to run migrations");

        tracing::debug!("Test database ready (SQLite in-memory)");

        Self { connection }
    }

    /// Clone of the pooled connection, for handing to a repository
    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }
}
