mod archive;
mod create;
mod remove;
mod update;

use std::sync::{Arc, Mutex};

use sqlx::SqlitePool;
use ulid::{Generator, Ulid};

#[derive(Clone)]
pub struct Command {
    write_db: SqlitePool,
    ids: Arc<Mutex<Generator>>,
}

impl Command {
    pub fn new(write_db: SqlitePool) -> Self {
        Self {
            write_db,
            ids: Arc::new(Mutex::new(Generator::new())),
        }
    }

    /// Ids are monotonic within a process so `(created_at, id)` keeps
    /// insertion order even for records created in the same millisecond.
    fn next_id(&self) -> anyhow::Result<Ulid> {
        let mut ids = self
            .ids
            .lock()
            .map_err(|_| anyhow::anyhow!("habit id generator poisoned"))?;

        Ok(ids.generate()?)
    }
}
