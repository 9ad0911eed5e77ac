use std::{path::PathBuf, str::FromStr};

use dinho_db::{Migrate, Plan};
use dinho_habit::{Argb, CreateHabitInput, Habits, Icon};
use dinho_shared::State;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let path = path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("non utf-8 path"))?
        .to_owned();
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{path}"))?.create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    dinho_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(State::single(pool))
}

#[allow(dead_code)]
pub async fn create_habit(habits: &Habits, name: impl Into<String>) -> anyhow::Result<String> {
    let habit = habits
        .command
        .create(CreateHabitInput::new(name, Icon::Book, Argb::default()))
        .await?;

    Ok(habit.id)
}
