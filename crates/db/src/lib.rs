//! Storage layer for detection records.
//!
//! Owns the connection pool, schema initialization, the row and DTO models,
//! and the repository functions used by the HTTP layer.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// DDL for the `detections` table, shared with [`reset_schema`].
const DETECTIONS_SCHEMA: &str =
    include_str!("../../../db/migrations/20250101000001_create_detections.sql");

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations. Safe to call on every start.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Drop and recreate the `detections` table, discarding every stored row.
///
/// Runs in a single transaction. Only invoked when explicitly enabled by
/// configuration; normal startup goes through [`run_migrations`].
pub async fn reset_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    tracing::warn!("Dropping and recreating the detections table");

    let mut tx = pool.begin().await?;
    sqlx::query("DROP TABLE IF EXISTS detections")
        .execute(&mut *tx)
        .await?;
    sqlx::raw_sql(DETECTIONS_SCHEMA).execute(&mut *tx).await?;
    tx.commit().await?;

    Ok(())
}
