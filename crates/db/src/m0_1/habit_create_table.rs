use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Habit;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(Habit::Table)
        .col(
            ColumnDef::new(Habit::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Habit::Name)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(
            ColumnDef::new(Habit::Icon)
                .string()
                .not_null()
                .string_len(25),
        )
        .col(ColumnDef::new(Habit::Color).big_integer().not_null())
        .col(
            ColumnDef::new(Habit::History)
                .text()
                .not_null()
                .default("{}"),
        )
        .col(
            ColumnDef::new(Habit::Archived)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(Habit::CreatedAt).big_integer().not_null())
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(Habit::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = up_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = down_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }
}
