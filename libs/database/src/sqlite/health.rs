use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::debug;

use crate::common::DatabaseError;

const HEALTH_QUERY: &str = "SELECT 1";

/// Check SQLite database health by running `SELECT 1`
///
/// ```ignore
/// use database::sqlite::check_health;
///
/// match check_health(&db).await {
///     Ok(()) => StatusCode::OK,
///     Err(_) => StatusCode::SERVICE_UNAVAILABLE,
/// }
/// ```
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    debug!(query = HEALTH_QUERY, "Running SQLite health check");

    let stmt = Statement::from_string(DatabaseBackend::Sqlite, HEALTH_QUERY.to_owned());
    db.query_one_raw(stmt)
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("SQLite health check failed: {}", e)))?;

    debug!("SQLite health check passed");
    Ok(())
}
