// File: soopwatch-core/src/test_utils/helpers.rs

use sqlx::sqlite::SqlitePoolOptions;

use crate::db::Database;
use crate::Error;

/// Create a fresh in-memory database with migrations applied.
///
/// A single connection keeps the in-memory database alive and shared for
/// the lifetime of the pool.
pub async fn create_test_db() -> Result<Database, Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    let db = Database::from_pool(pool);
    db.migrate().await?;
    Ok(db)
}
