//! Persistence for rooms.
//!
//! Exposes the [`store::RoomStore`] trait with a PostgreSQL implementation
//! (sqlx) and an in-memory one, plus pool creation, health check and
//! migrations for the PostgreSQL side.

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod models;
pub mod store;

pub use error::StoreError;
pub use store::{MemoryRoomStore, PgRoomStore, RoomStore};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the database answers.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
