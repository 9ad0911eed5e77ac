use std::str::FromStr;

use dinho_db::table::Habit as HabitIden;
use sea_query::{Expr, ExprTrait, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use time::OffsetDateTime;

use crate::{Argb, Habit, HistoryMap, Icon};

#[derive(Debug, FromRow)]
pub struct HabitRow {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: i64,
    pub history: String,
    pub archived: bool,
    pub created_at: i64,
}

impl TryFrom<HabitRow> for Habit {
    type Error = anyhow::Error;

    fn try_from(row: HabitRow) -> Result<Self, Self::Error> {
        let icon = Icon::from_str(&row.icon)?;
        let color = Argb::from_packed(u32::try_from(row.color)?);
        let history: HistoryMap = serde_json::from_str(&row.history)?;
        let created_at =
            OffsetDateTime::from_unix_timestamp_nanos(i128::from(row.created_at) * 1_000_000)?;

        Ok(Habit {
            id: row.id,
            name: row.name,
            icon,
            color,
            history,
            archived: row.archived,
            created_at,
        })
    }
}

pub(crate) fn select_statement() -> SelectStatement {
    sea_query::Query::select()
        .columns([
            HabitIden::Id,
            HabitIden::Name,
            HabitIden::Icon,
            HabitIden::Color,
            HabitIden::History,
            HabitIden::Archived,
            HabitIden::CreatedAt,
        ])
        .from(HabitIden::Table)
        .to_owned()
}

pub(crate) async fn fetch_one(pool: &SqlitePool, id: &str) -> anyhow::Result<Option<Habit>> {
    let statement = select_statement()
        .and_where(Expr::col(HabitIden::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_as_with::<_, HabitRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    row.map(Habit::try_from).transpose()
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    /// Habits ordered by creation, optionally filtered on `archived`.
    pub async fn all(&self, archived: Option<bool>) -> anyhow::Result<Vec<Habit>> {
        let mut statement = select_statement();
        if let Some(archived) = archived {
            statement.and_where(Expr::col(HabitIden::Archived).eq(archived));
        }
        statement
            .order_by_expr(Expr::col(HabitIden::CreatedAt), Order::Asc)
            .order_by_expr(Expr::col(HabitIden::Id), Order::Asc);

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, HabitRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        rows.into_iter().map(Habit::try_from).collect()
    }

    pub async fn find(&self, id: impl AsRef<str>) -> anyhow::Result<Option<Habit>> {
        fetch_one(&self.0, id.as_ref()).await
    }
}
