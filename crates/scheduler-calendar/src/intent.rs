//! Messages crossing the rendering boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Event, EventDraft, ViewMode};

/// A user action reported by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Intent {
    SelectDay(NaiveDate),
    SelectEvent(String),
    SwitchView(ViewMode),
    StepForward,
    StepBackward,
    JumpToDate(NaiveDate),
    GoToToday,
    SubmitEvent(EventDraft),
    DeleteEvent(String),
}

impl Intent {
    /// Whether handling this intent changes the event collection.
    pub fn mutates_events(&self) -> bool {
        matches!(self, Intent::SubmitEvent(_) | Intent::DeleteEvent(_))
    }
}

/// Which form the presentation layer should open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "form", rename_all = "lowercase")]
pub enum SelectionIntent {
    Create { date: NaiveDate },
    Edit { event: Event },
}

impl SelectionIntent {
    /// Draft that pre-fills the form.
    pub fn draft(&self) -> EventDraft {
        match self {
            SelectionIntent::Create { date } => {
                EventDraft::new(String::new(), crate::date_math::format_date(*date))
            }
            SelectionIntent::Edit { event } => event.to_draft(),
        }
    }
}
