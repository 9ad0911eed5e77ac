use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use std::str::FromStr;
use tracing::log::LevelFilter;

const PRAGMAS: [&str; 5] = [
    "PRAGMA journal_mode = WAL",
    "PRAGMA busy_timeout = 5000",
    "PRAGMA synchronous = NORMAL",
    "PRAGMA cache_size = -20000",
    "PRAGMA temp_store = memory",
];

#[derive(Debug, Clone, Copy)]
enum Access {
    ReadOnly,
    ReadWrite,
}

async fn connect(database_url: &str, access: Access, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.log_statements(LevelFilter::Debug);
    let options = match access {
        Access::ReadOnly => options.read_only(true),
        Access::ReadWrite => options.create_if_missing(true),
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    for pragma in PRAGMAS {
        sqlx::query(pragma).execute(&pool).await?;
    }

    tracing::info!(?access, max_connections, "database pool ready");

    Ok(pool)
}

/// Habit queries. Open it after [`create_write_pool`], which creates the file.
pub async fn create_read_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    connect(database_url, Access::ReadOnly, max_connections).await
}

/// Habit commands share one connection so writes never contend.
pub async fn create_write_pool(database_url: &str) -> Result<SqlitePool> {
    connect(database_url, Access::ReadWrite, 1).await
}

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    connect(database_url, Access::ReadWrite, max_connections).await
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    use dinho_db::Migrate;

    let mut conn = pool.acquire().await?;
    dinho_db::migrator()?
        .run(&mut conn, &dinho_db::Plan::apply_all())
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let pool = create_pool(":memory:", 1).await.unwrap();

        migrate(&pool).await.unwrap();
        migrate(&pool).await.unwrap();

        let (busy_timeout,): (i64,) = sqlx::query_as("PRAGMA busy_timeout")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(busy_timeout, 5000);

        let (habits,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM habit")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(habits, 0);
    }

    #[tokio::test]
    async fn test_read_pool_rejects_writes() {
        let dir = temp_dir::TempDir::new().unwrap();
        let url = format!("sqlite:{}", dir.child("db.sqlite3").to_str().unwrap());

        let write_pool = create_write_pool(&url).await.unwrap();
        migrate(&write_pool).await.unwrap();
        let read_pool = create_read_pool(&url, 2).await.unwrap();

        let result = sqlx::query("DELETE FROM habit").execute(&read_pool).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_read_pool_sees_migrated_schema() {
        let dir = temp_dir::TempDir::new().unwrap();
        let url = format!("sqlite:{}", dir.child("db.sqlite3").to_str().unwrap());

        let write_pool = create_write_pool(&url).await.unwrap();
        migrate(&write_pool).await.unwrap();

        let read_pool = create_read_pool(&url, 2).await.unwrap();
        let journal_mode: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&read_pool)
            .await
            .unwrap();
        assert_eq!(journal_mode.0, "wal");

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM habit")
            .fetch_one(&read_pool)
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }
}
