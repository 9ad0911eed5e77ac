use std::sync::Arc;

use dinho_shared::{Result, Session};

use crate::{CreateHabitInput, Habit, HabitPatch};

/// Source of truth for habit records.
///
/// Implementations translate every failure into one of the
/// [`dinho_shared::Error`] kinds; nothing else escapes to the caller.
#[async_trait::async_trait]
pub trait HabitStore: Send + Sync {
    /// All habits, oldest first.
    async fn list(&self, session: &Session) -> Result<Vec<Habit>>;

    async fn get(&self, session: &Session, id: &str) -> Result<Habit>;

    async fn create(&self, session: &Session, input: CreateHabitInput) -> Result<Habit>;

    /// Replace every field present in `patch`.
    async fn update(&self, session: &Session, id: &str, patch: HabitPatch) -> Result<Habit>;

    async fn remove(&self, session: &Session, id: &str) -> Result<()>;
}

#[async_trait::async_trait]
impl<S: HabitStore + ?Sized> HabitStore for Arc<S> {
    async fn list(&self, session: &Session) -> Result<Vec<Habit>> {
        (**self).list(session).await
    }

    async fn get(&self, session: &Session, id: &str) -> Result<Habit> {
        (**self).get(session, id).await
    }

    async fn create(&self, session: &Session, input: CreateHabitInput) -> Result<Habit> {
        (**self).create(session, input).await
    }

    async fn update(&self, session: &Session, id: &str, patch: HabitPatch) -> Result<Habit> {
        (**self).update(session, id, patch).await
    }

    async fn remove(&self, session: &Session, id: &str) -> Result<()> {
        (**self).remove(session, id).await
    }
}
