/// Unified database error type for all database operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}
