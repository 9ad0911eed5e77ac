use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use validator::Validate;

use crate::{Argb, HistoryMap, Icon};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub icon: Icon,
    pub color: Argb,
    #[serde(default)]
    pub history: HistoryMap,
    #[serde(default)]
    pub archived: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateHabitInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub icon: Icon,
    #[serde(default)]
    pub color: Argb,
}

impl CreateHabitInput {
    pub fn new(name: impl Into<String>, icon: Icon, color: Argb) -> Self {
        Self {
            name: name.into(),
            icon,
            color,
        }
    }

    /// Trim the name and run field validation.
    pub fn normalized(mut self) -> dinho_shared::Result<Self> {
        self.name = self.name.trim().to_owned();
        self.validate()?;

        Ok(self)
    }
}

/// Partial update. Every present field replaces the stored value whole;
/// `history` in particular is never merged per key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HabitPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Argb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<HistoryMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl HabitPatch {
    pub fn history(history: HistoryMap) -> Self {
        Self {
            history: Some(history),
            ..Default::default()
        }
    }

    pub fn archived(archived: bool) -> Self {
        Self {
            archived: Some(archived),
            ..Default::default()
        }
    }

    pub fn details(name: impl Into<String>, icon: Icon, color: Argb) -> Self {
        Self {
            name: Some(name.into()),
            icon: Some(icon),
            color: Some(color),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.icon.is_none()
            && self.color.is_none()
            && self.history.is_none()
            && self.archived.is_none()
    }

    pub fn normalized(mut self) -> dinho_shared::Result<Self> {
        if let Some(name) = self.name.as_mut() {
            *name = name.trim().to_owned();
        }
        self.validate()?;

        Ok(self)
    }

    /// Apply the patch to a record, leaving identity and `created_at` alone.
    pub fn apply_to(&self, habit: &mut Habit) {
        if let Some(name) = &self.name {
            habit.name = name.to_owned();
        }
        if let Some(icon) = self.icon {
            habit.icon = icon;
        }
        if let Some(color) = self.color {
            habit.color = color;
        }
        if let Some(history) = &self.history {
            habit.history = history.clone();
        }
        if let Some(archived) = self.archived {
            habit.archived = archived;
        }
    }
}
