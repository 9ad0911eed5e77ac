use dinho_db::table::Habit as HabitIden;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::{Habit, HabitPatch, HistoryMap};

impl super::Command {
    pub async fn update(
        &self,
        id: impl Into<String>,
        patch: HabitPatch,
    ) -> dinho_shared::Result<Habit> {
        let id = id.into();
        let patch = patch.normalized()?;

        if patch.is_empty() {
            return self.reload(&id).await;
        }

        let mut statement = Query::update();
        statement.table(HabitIden::Table);

        if let Some(name) = &patch.name {
            statement.value(HabitIden::Name, name.to_owned());
        }
        if let Some(icon) = patch.icon {
            statement.value(HabitIden::Icon, icon.to_string());
        }
        if let Some(color) = patch.color {
            statement.value(HabitIden::Color, i64::from(color.packed()));
        }
        if let Some(history) = &patch.history {
            statement.value(HabitIden::History, serde_json::to_string(history)?);
        }
        if let Some(archived) = patch.archived {
            statement.value(HabitIden::Archived, archived);
        }

        statement.and_where(Expr::col(HabitIden::Id).eq(id.as_str()));

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            dinho_shared::not_found!("habit {} not found", id);
        }

        tracing::info!(
            habit_id = %id,
            history = patch.history.is_some(),
            archived = ?patch.archived,
            "habit updated"
        );

        self.reload(&id).await
    }

    /// Overwrite the whole history map.
    pub async fn replace_history(
        &self,
        id: impl Into<String>,
        history: HistoryMap,
    ) -> dinho_shared::Result<Habit> {
        self.update(id, HabitPatch::history(history)).await
    }

    pub(super) async fn reload(&self, id: &str) -> dinho_shared::Result<Habit> {
        let Some(habit) = crate::query::fetch_one(&self.write_db, id).await? else {
            dinho_shared::not_found!("habit {} not found", id);
        };

        Ok(habit)
    }
}
