use sqlx_migrator::{Info, Migrator, vec_box};

mod m0_1;
pub mod table;

pub use sqlx_migrator::{Migrate, Plan};

pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec_box![m0_1::Migration])?;

    Ok(migrator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn test_migrations_create_habit_table() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        let mut conn = pool.acquire().await.unwrap();
        migrator()
            .unwrap()
            .run(&mut conn, &Plan::apply_all())
            .await
            .unwrap();
        drop(conn);

        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'habit'")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(tables.len(), 1);

        let index: Option<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND name = 'idx_habit_created_at'",
        )
        .fetch_optional(&pool)
        .await
        .unwrap();
        assert!(index.is_some());
    }
}
