//! Calendar data types.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dated calendar entry as stored locally and exchanged in export files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Free-form clock time, e.g. "09:30".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Event {
    /// True if this event falls on `date`. Time of day is never compared.
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }

    /// Copy of the event as an edit form would be pre-filled.
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            id: Some(self.id.clone()),
            title: self.title.clone(),
            date: crate::date_math::format_date(self.date),
            time: self.time.clone(),
            description: self.description.clone(),
        }
    }
}

/// Raw form submission. `id` is `None` when creating a new event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Calendar granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Annual,
    #[default]
    Monthly,
    Weekly,
    Daily,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [
        ViewMode::Annual,
        ViewMode::Monthly,
        ViewMode::Weekly,
        ViewMode::Daily,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Annual => "annual",
            ViewMode::Monthly => "monthly",
            ViewMode::Weekly => "weekly",
            ViewMode::Daily => "daily",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownViewMode(pub String);

impl fmt::Display for UnknownViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown view mode: {}", self.0)
    }
}

impl std::error::Error for UnknownViewMode {}

impl FromStr for ViewMode {
    type Err = UnknownViewMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annual" | "year" => Ok(ViewMode::Annual),
            "monthly" | "month" => Ok(ViewMode::Monthly),
            "weekly" | "week" => Ok(ViewMode::Weekly),
            "daily" | "day" => Ok(ViewMode::Daily),
            other => Err(UnknownViewMode(other.to_string())),
        }
    }
}

/// The anchor date plus the active view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub reference_date: NaiveDate,
    pub view_mode: ViewMode,
}
