//! Reference date / view mode state machine.

use chrono::{Local, NaiveDate};

use crate::date_math::{period_title, shift, Direction};
use crate::types::{NavigationState, ViewMode};

/// Owns the `(reference_date, view_mode)` pair. Every transition is legal.
#[derive(Debug, Clone)]
pub struct NavigationController {
    state: NavigationState,
}

impl NavigationController {
    /// Start in monthly view anchored on `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self::with_mode(today, ViewMode::default())
    }

    pub fn with_mode(reference_date: NaiveDate, view_mode: ViewMode) -> Self {
        Self {
            state: NavigationState {
                reference_date,
                view_mode,
            },
        }
    }

    /// Current local calendar date.
    pub fn now() -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.state.reference_date
    }

    pub fn view_mode(&self) -> ViewMode {
        self.state.view_mode
    }

    /// Title of the period currently shown.
    pub fn title(&self) -> String {
        period_title(self.state.reference_date, self.state.view_mode)
    }

    pub fn switch_view(&mut self, mode: ViewMode) {
        tracing::debug!("View {} -> {}", self.state.view_mode, mode);
        self.state.view_mode = mode;
    }

    pub fn step_forward(&mut self) {
        self.step(Direction::Forward);
    }

    pub fn step_backward(&mut self) {
        self.step(Direction::Backward);
    }

    fn step(&mut self, direction: Direction) {
        let next = shift(self.state.reference_date, self.state.view_mode, direction);
        tracing::debug!(
            "Step {:?} in {} view: {} -> {}",
            direction,
            self.state.view_mode,
            self.state.reference_date,
            next
        );
        self.state.reference_date = next;
    }

    /// Open `date` in daily view.
    pub fn jump_to_date(&mut self, date: NaiveDate) {
        tracing::debug!("Jump to {}", date);
        self.state = NavigationState {
            reference_date: date,
            view_mode: ViewMode::Daily,
        };
    }

    /// Re-anchor on `today`, keeping the current view.
    pub fn go_to_today(&mut self, today: NaiveDate) {
        tracing::debug!("Back to today ({})", today);
        self.state.reference_date = today;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let nav = NavigationController::new(date(2024, 2, 15));
        assert_eq!(nav.view_mode(), ViewMode::Monthly);
        assert_eq!(nav.reference_date(), date(2024, 2, 15));
        assert_eq!(nav.title(), "February 2024");
    }

    #[test]
    fn test_switch_view_keeps_reference() {
        let mut nav = NavigationController::new(date(2024, 2, 15));
        nav.switch_view(ViewMode::Weekly);

        assert_eq!(nav.view_mode(), ViewMode::Weekly);
        assert_eq!(nav.reference_date(), date(2024, 2, 15));
        assert_eq!(nav.title(), "Week: 2/11/2024 - 2/17/2024");
    }

    #[test]
    fn test_step_follows_view() {
        let mut nav = NavigationController::new(date(2024, 2, 15));
        nav.step_forward();
        assert_eq!(nav.reference_date(), date(2024, 3, 15));

        nav.switch_view(ViewMode::Weekly);
        nav.step_backward();
        assert_eq!(nav.reference_date(), date(2024, 3, 8));

        nav.switch_view(ViewMode::Daily);
        nav.step_forward();
        assert_eq!(nav.reference_date(), date(2024, 3, 9));

        nav.switch_view(ViewMode::Annual);
        nav.step_forward();
        assert_eq!(nav.reference_date(), date(2025, 3, 9));
        assert_eq!(nav.title(), "2025");
    }

    #[test]
    fn test_jump_to_date_opens_daily() {
        let mut nav = NavigationController::with_mode(date(2024, 2, 15), ViewMode::Annual);
        nav.jump_to_date(date(2024, 7, 4));

        assert_eq!(nav.view_mode(), ViewMode::Daily);
        assert_eq!(nav.title(), "Thursday, July 4, 2024");
    }

    #[test]
    fn test_go_to_today_keeps_view() {
        let mut nav = NavigationController::with_mode(date(2020, 1, 1), ViewMode::Weekly);
        nav.go_to_today(date(2024, 2, 15));

        assert_eq!(nav.view_mode(), ViewMode::Weekly);
        assert_eq!(nav.reference_date(), date(2024, 2, 15));
    }
}
