use dinho_db::table::Habit as HabitIden;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::Habit;

impl super::Command {
    /// Flip `archived` in a single statement.
    pub async fn toggle_archive(&self, id: impl Into<String>) -> dinho_shared::Result<Habit> {
        let id = id.into();

        let statement = Query::update()
            .table(HabitIden::Table)
            .value(HabitIden::Archived, Expr::col(HabitIden::Archived).eq(false))
            .and_where(Expr::col(HabitIden::Id).eq(id.as_str()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            dinho_shared::not_found!("habit {} not found", id);
        }

        let habit = self.reload(&id).await?;
        tracing::info!(habit_id = %id, archived = habit.archived, "habit archive toggled");

        Ok(habit)
    }
}
