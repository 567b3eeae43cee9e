use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::info;

use crate::error::StorageError;

/// Upper bound on waiting for a free pooled connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the process-wide connection pool.
///
/// The pool connects lazily, so a database that is down at startup surfaces
/// on the first request rather than preventing the service from starting.
pub fn build_pool(database_url: &str, max_connections: u32) -> Result<PgPool, StorageError> {
    let options: PgConnectOptions = database_url
        .parse()
        .map_err(|e: sqlx::Error| StorageError::Config(e.to_string()))?;

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_lazy_with(options);

    info!(max_connections, "database pool configured");

    Ok(pool)
}
