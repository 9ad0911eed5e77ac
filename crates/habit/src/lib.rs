pub mod calendar;
mod color;
mod command;
mod date;
mod history;
mod icon;
mod model;
mod query;
mod store;
pub mod sync;

pub use color::*;
pub use command::Command;
pub use date::*;
pub use history::*;
pub use icon::*;
pub use model::*;
pub use query::{HabitRow, Query};
pub use store::*;
pub use sync::HabitSync;

use dinho_shared::{Result, Session, State};

/// SQLite backed [`HabitStore`]: writes go through [`Command`], reads
/// through [`Query`].
#[derive(Clone)]
pub struct Habits {
    pub command: Command,
    pub query: Query,
}

impl Habits {
    pub fn new(state: &State) -> Self {
        Self {
            command: Command::new(state.write_db.clone()),
            query: Query(state.read_db.clone()),
        }
    }

    pub async fn list_filtered(&self, archived: Option<bool>) -> Result<Vec<Habit>> {
        Ok(self.query.all(archived).await?)
    }

    pub async fn find(&self, id: &str) -> Result<Habit> {
        let Some(habit) = self.query.find(id).await? else {
            dinho_shared::not_found!("habit {} not found", id);
        };

        Ok(habit)
    }

    pub async fn toggle_archive(&self, id: &str) -> Result<Habit> {
        self.command.toggle_archive(id).await
    }

    pub async fn replace_history(&self, id: &str, history: HistoryMap) -> Result<Habit> {
        self.command.replace_history(id, history).await
    }
}

// The server authenticates requests before they reach the store, so the
// session is not consulted here.
#[async_trait::async_trait]
impl HabitStore for Habits {
    async fn list(&self, _session: &Session) -> Result<Vec<Habit>> {
        self.list_filtered(None).await
    }

    async fn get(&self, _session: &Session, id: &str) -> Result<Habit> {
        self.find(id).await
    }

    async fn create(&self, _session: &Session, input: CreateHabitInput) -> Result<Habit> {
        self.command.create(input).await
    }

    async fn update(&self, _session: &Session, id: &str, patch: HabitPatch) -> Result<Habit> {
        self.command.update(id, patch).await
    }

    async fn remove(&self, _session: &Session, id: &str) -> Result<()> {
        self.command.remove(id).await
    }
}
