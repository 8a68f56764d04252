//! Database connection pool initialization.
//!
//! The connection string is read from `DATABASE_URL`.

use sqlx::PgPool;
use std::env;

/// Initialize the PostgreSQL connection pool used by all handlers.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the connection fails; both are
/// startup failures.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
