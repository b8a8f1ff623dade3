use sqlx::{Pool, Sqlite, sqlite::SqlitePoolOptions};
use std::sync::Arc;
use std::time::Duration;

pub type DbPool = Arc<Pool<Sqlite>>;

pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let pool = SqlitePoolOptions::new().connect(database_url).await?;
    run_migrations(&pool).await?;
    Ok(Arc::new(pool))
}

/// Single-connection in-memory pool. Every connection to `sqlite::memory:`
/// opens its own database, so the pool must never replace its connection.
pub async fn create_memory_pool() -> anyhow::Result<DbPool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await?;
    run_migrations(&pool).await?;
    Ok(Arc::new(pool))
}

pub async fn run_migrations(pool: &Pool<Sqlite>) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub async fn close(pool: &DbPool) {
    pool.close().await;
    tracing::info!("Database pool closed");
}
