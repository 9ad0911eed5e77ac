//! Optimistic client-side view over a [`HabitStore`].
//!
//! Every habit has an async gate. Mutations on one habit run strictly one
//! after another, while a toggle's flip is visible in [`HabitSync::displayed`]
//! as soon as it is queued. Different habits never wait on each other.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use dinho_shared::{Error, Result, Session};

use crate::{CreateHabitInput, DateKey, Habit, HabitPatch, HabitStore, HistoryMap};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy)]
struct PendingFlip {
    seq: u64,
    key: DateKey,
    value: bool,
}

#[derive(Debug)]
struct EntryState {
    confirmed: Habit,
    pending: Vec<PendingFlip>,
}

impl EntryState {
    fn displayed_history(&self) -> HistoryMap {
        self.pending
            .iter()
            .fold(self.confirmed.history.clone(), |history, flip| {
                history.set(flip.key, flip.value)
            })
    }

    fn displayed(&self) -> Habit {
        Habit {
            history: self.displayed_history(),
            ..self.confirmed.clone()
        }
    }
}

#[derive(Debug)]
struct Entry {
    gate: tokio::sync::Mutex<()>,
    state: Mutex<EntryState>,
}

impl Entry {
    fn new(habit: Habit) -> Self {
        Self {
            gate: tokio::sync::Mutex::new(()),
            state: Mutex::new(EntryState {
                confirmed: habit,
                pending: Vec::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, EntryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Owns one queued flip. Dropping the guard without [`FlipGuard::settle`]
/// withdraws the flip, so a cancelled toggle never stays on screen.
struct FlipGuard<'a> {
    entry: &'a Entry,
    seq: u64,
    armed: bool,
}

impl<'a> FlipGuard<'a> {
    fn push(entry: &'a Entry, seq: u64, key: DateKey) -> (Self, bool) {
        let mut state = entry.state();
        let value = !state.displayed_history().get(&key);
        state.pending.push(PendingFlip { seq, key, value });

        (
            Self {
                entry,
                seq,
                armed: true,
            },
            value,
        )
    }

    fn settle(mut self, state: &mut EntryState) {
        state.pending.retain(|flip| flip.seq != self.seq);
        self.armed = false;
    }
}

impl Drop for FlipGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let seq = self.seq;
        self.entry.state().pending.retain(|flip| flip.seq != seq);
        tracing::debug!(seq, "toggle cancelled, flip withdrawn");
    }
}

pub struct HabitSync<S> {
    store: S,
    session: Session,
    timeout: Duration,
    seq: AtomicU64,
    entries: Mutex<HashMap<String, Arc<Entry>>>,
}

impl<S: HabitStore> HabitSync<S> {
    pub fn new(store: S, session: Session) -> Self {
        Self {
            store,
            session,
            timeout: DEFAULT_TIMEOUT,
            seq: AtomicU64::new(0),
            entries: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Arc<Entry>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cached(&self, id: &str) -> Option<Arc<Entry>> {
        self.entries().get(id).cloned()
    }

    async fn bounded<T>(&self, request: impl Future<Output = Result<T>>) -> Result<T> {
        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(Error::TransientIo(format!(
                "request timed out after {:?}",
                self.timeout
            ))),
        }
    }

    async fn entry(&self, id: &str) -> Result<Arc<Entry>> {
        if let Some(entry) = self.cached(id) {
            return Ok(entry);
        }

        let habit = self.bounded(self.store.get(&self.session, id)).await?;
        let entry = self
            .entries()
            .entry(habit.id.to_owned())
            .or_insert_with(|| Arc::new(Entry::new(habit)))
            .clone();

        Ok(entry)
    }

    /// Reload every habit from the store. Flips still in flight stay
    /// overlaid on the fresh records.
    pub async fn refresh(&self) -> Result<Vec<Habit>> {
        let habits = self.bounded(self.store.list(&self.session)).await?;

        let mut entries = self.entries();
        let mut fresh = HashMap::with_capacity(habits.len());
        for habit in habits {
            let id = habit.id.to_owned();
            let entry = match entries.remove(&id) {
                Some(entry) => {
                    entry.state().confirmed = habit;
                    entry
                }
                None => Arc::new(Entry::new(habit)),
            };
            fresh.insert(id, entry);
        }
        *entries = fresh;
        drop(entries);

        Ok(self.habits())
    }

    /// Displayed records, oldest first.
    pub fn habits(&self) -> Vec<Habit> {
        let mut habits = self
            .entries()
            .values()
            .map(|entry| entry.state().displayed())
            .collect::<Vec<_>>();
        habits.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        habits
    }

    pub fn active(&self) -> Vec<Habit> {
        self.habits().into_iter().filter(|h| !h.archived).collect()
    }

    pub fn archived(&self) -> Vec<Habit> {
        self.habits().into_iter().filter(|h| h.archived).collect()
    }

    /// Last confirmed record with queued flips applied.
    pub fn displayed(&self, id: &str) -> Option<Habit> {
        self.cached(id).map(|entry| entry.state().displayed())
    }

    pub fn confirmed(&self, id: &str) -> Option<Habit> {
        self.cached(id).map(|entry| entry.state().confirmed.clone())
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.cached(id)
            .is_some_and(|entry| !entry.state().pending.is_empty())
    }

    pub async fn toggle_str(&self, id: &str, key: &str) -> Result<Habit> {
        let key = DateKey::parse(key)?;

        self.toggle(id, key).await
    }

    /// Flip one day's completion.
    ///
    /// The flip shows up in [`Self::displayed`] before the first await. The
    /// request itself waits for any earlier mutation of the same habit and
    /// sends the last confirmed history with this single flip applied. On
    /// failure, or when the future is dropped before it resolves, the flip
    /// is discarded.
    #[tracing::instrument(skip(self, key), fields(key = %key))]
    pub async fn toggle(&self, id: &str, key: DateKey) -> Result<Habit> {
        let entry = self.entry(id).await?;
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);

        let (flip, value) = FlipGuard::push(&entry, seq, key);

        let _gate = entry.gate.lock().await;

        let history = entry.state().confirmed.history.set(key, value);
        let result = self
            .bounded(self.store.update(&self.session, id, HabitPatch::history(history)))
            .await;

        let mut state = entry.state();
        flip.settle(&mut state);

        match result {
            Ok(habit) => {
                state.confirmed = habit;
                tracing::debug!(habit_id = %id, completed = value, "toggle confirmed");

                Ok(state.displayed())
            }
            Err(err) => {
                tracing::warn!(habit_id = %id, error = %err, "toggle rolled back");

                Err(err)
            }
        }
    }

    /// Rename, re-icon or re-color. History goes through [`Self::toggle`].
    pub async fn update_details(&self, id: &str, patch: HabitPatch) -> Result<Habit> {
        if patch.history.is_some() {
            dinho_shared::invalid!("history changes must go through toggle");
        }
        let patch = patch.normalized()?;

        self.mutate(id, |_| patch).await
    }

    pub async fn toggle_archive(&self, id: &str) -> Result<Habit> {
        self.mutate(id, |confirmed| HabitPatch::archived(!confirmed.archived))
            .await
    }

    async fn mutate(&self, id: &str, patch: impl FnOnce(&Habit) -> HabitPatch) -> Result<Habit> {
        let entry = self.entry(id).await?;
        let _gate = entry.gate.lock().await;

        let patch = patch(&entry.state().confirmed);
        let result = self
            .bounded(self.store.update(&self.session, id, patch))
            .await;

        match result {
            Ok(habit) => {
                let mut state = entry.state();
                state.confirmed = habit;

                Ok(state.displayed())
            }
            Err(err) => {
                tracing::warn!(habit_id = %id, error = %err, "habit update failed");

                Err(err)
            }
        }
    }

    pub async fn create(&self, input: CreateHabitInput) -> Result<Habit> {
        let input = input.normalized()?;
        let habit = self.bounded(self.store.create(&self.session, input)).await?;

        self.entries()
            .insert(habit.id.to_owned(), Arc::new(Entry::new(habit.clone())));

        Ok(habit)
    }

    pub async fn remove(&self, id: &str) -> Result<()> {
        let entry = self.entry(id).await?;
        let _gate = entry.gate.lock().await;

        if let Err(err) = self.bounded(self.store.remove(&self.session, id)).await {
            tracing::warn!(habit_id = %id, error = %err, "habit removal failed");

            return Err(err);
        }

        self.entries().remove(id);

        Ok(())
    }
}
