//! Calendar model for Scheduler.
//!
//! Date arithmetic, the event store, period projection and navigation.

pub mod date_math;
pub mod intent;
pub mod navigation;
pub mod projector;
pub mod store;
pub mod types;

pub use date_math::{format_date, parse_date, period_title, shift, week_start, Direction};
pub use intent::{Intent, SelectionIntent};
pub use navigation::NavigationController;
pub use projector::{project, DayCell, GridCell, MonthGrid, PeriodModel};
pub use store::EventStore;
pub use types::{Event, EventDraft, NavigationState, ViewMode};
