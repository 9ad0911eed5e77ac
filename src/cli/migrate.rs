use anyhow::Result;
use sqlx::migrate::MigrateDatabase;

#[tracing::instrument(skip(config))]
pub async fn migrate(config: crate::config::Config) -> Result<()> {
    tracing::info!("running database migrations");

    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    crate::db::migrate(&pool).await?;
    pool.close().await;

    tracing::info!("migrations completed successfully");

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn reset(config: crate::config::Config) -> Result<()> {
    tracing::info!("resetting database");

    if sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::warn!("dropping existing database: {}", config.database.url);
        sqlx::Sqlite::drop_database(&config.database.url).await?;
    } else {
        tracing::info!("database does not exist, nothing to drop");
    }

    migrate(config).await?;

    tracing::info!("database reset completed successfully");

    Ok(())
}
