//! Database connection management.

use sqlx::PgPool;

const SCHEMA_SQL: &str = include_str!("sql/schema.sql");

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Create the service's tables if they do not exist yet.
///
/// Safe to run on every startup; every statement is `IF NOT EXISTS`.
///
/// # Errors
///
/// Returns an error if a schema statement fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;

    Ok(())
}
