use dinho_db::table::Habit as HabitIden;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    /// Permanent delete.
    pub async fn remove(&self, id: impl Into<String>) -> dinho_shared::Result<()> {
        let id = id.into();

        let statement = Query::delete()
            .from_table(HabitIden::Table)
            .and_where(Expr::col(HabitIden::Id).eq(id.as_str()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            dinho_shared::not_found!("habit {} not found", id);
        }

        tracing::info!(habit_id = %id, "habit removed");

        Ok(())
    }
}
