use dinho_db::table::Habit as HabitIden;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;

use crate::{CreateHabitInput, Habit, HistoryMap};

impl super::Command {
    pub async fn create(&self, input: CreateHabitInput) -> dinho_shared::Result<Habit> {
        let input = input.normalized()?;
        let id = self.next_id()?;
        let created_at = OffsetDateTime::from(id.datetime());
        let created_ms = i64::try_from(created_at.unix_timestamp_nanos() / 1_000_000)
            .map_err(anyhow::Error::from)?;

        let habit = Habit {
            id: id.to_string(),
            name: input.name,
            icon: input.icon,
            color: input.color,
            history: HistoryMap::new(),
            archived: false,
            created_at,
        };

        let statement = Query::insert()
            .into_table(HabitIden::Table)
            .columns([
                HabitIden::Id,
                HabitIden::Name,
                HabitIden::Icon,
                HabitIden::Color,
                HabitIden::History,
                HabitIden::Archived,
                HabitIden::CreatedAt,
            ])
            .values_panic([
                habit.id.to_owned().into(),
                habit.name.to_owned().into(),
                habit.icon.to_string().into(),
                i64::from(habit.color.packed()).into(),
                serde_json::to_string(&habit.history)?.into(),
                habit.archived.into(),
                created_ms.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        tracing::info!(habit_id = %habit.id, name = %habit.name, "habit created");

        Ok(habit)
    }
}
