use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use crate::DateKey;

/// Sparse date-keyed completion record for one habit.
///
/// An absent key reads as `false`. [`HistoryMap::set`] stores `false`
/// explicitly rather than removing the key, so a map written through
/// persistence reads back with the same keys it was saved with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryMap(BTreeMap<DateKey, bool>);

impl HistoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &DateKey) -> bool {
        self.0.get(key).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn set(&self, key: DateKey, value: bool) -> Self {
        let mut next = self.clone();
        next.0.insert(key, value);
        next
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_key(&self, key: &DateKey) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &bool)> {
        self.0.iter()
    }

    /// Dates flagged as completed, ascending.
    pub fn completed(&self) -> impl Iterator<Item = &DateKey> {
        self.0.iter().filter(|(_, done)| **done).map(|(key, _)| key)
    }

    /// Equality under [`HistoryMap::get`]: explicit `false` and absence match.
    pub fn equivalent(&self, other: &HistoryMap) -> bool {
        self.completed().eq(other.completed())
    }
}

impl FromIterator<(DateKey, bool)> for HistoryMap {
    fn from_iter<T: IntoIterator<Item = (DateKey, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The last `days` date keys ending at `today`, oldest first.
pub fn recent_window(today: Date, days: u16) -> dinho_shared::Result<Vec<DateKey>> {
    let mut keys = Vec::with_capacity(days.into());
    for offset in (0..i64::from(days)).rev() {
        let Some(date) = today.checked_sub(Duration::days(offset)) else {
            dinho_shared::invalid!("date window before {} is out of range", today);
        };
        keys.push(DateKey::try_from(date)?);
    }

    Ok(keys)
}
