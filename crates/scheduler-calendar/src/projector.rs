//! Projection of (reference date, view mode, events) into a declarative
//! period model that a presentation layer can draw directly.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::date_math::{month_length, period_title, week_start};
use crate::types::{Event, ViewMode};

/// Columns of the annual month layout.
pub const ANNUAL_COLUMNS: usize = 3;
/// Cells per calendar week row.
pub const DAYS_PER_WEEK: usize = 7;

/// A single calendar day and what is scheduled on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Events bound to `date`. Left empty in annual view, where only
    /// `has_events` is populated.
    pub events: Vec<Event>,
    pub has_events: bool,
    pub is_today: bool,
}

impl DayCell {
    fn new(date: NaiveDate, events: Vec<Event>, has_events: bool) -> Self {
        Self {
            date,
            events,
            has_events,
            is_today: false,
        }
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// A slot in a month grid: padding before the 1st, or a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GridCell {
    Blank,
    Day(DayCell),
}

impl GridCell {
    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            GridCell::Blank => None,
            GridCell::Day(cell) => Some(cell),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, GridCell::Blank)
    }
}

/// One month laid out Sunday-first, with leading blanks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    /// 0-based month index.
    pub month0: u32,
    pub title: String,
    pub cells: Vec<GridCell>,
    /// Position in the annual layout; (0, 0) outside annual view.
    pub row: usize,
    pub column: usize,
}

impl MonthGrid {
    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_blank()).count()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(GridCell::as_day)
    }

    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.days().find(|c| c.day() == day)
    }

    /// Cells chunked into week rows of seven.
    pub fn weeks(&self) -> std::slice::Chunks<'_, GridCell> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    fn days_mut(&mut self) -> impl Iterator<Item = &mut DayCell> {
        self.cells.iter_mut().filter_map(|c| match c {
            GridCell::Blank => None,
            GridCell::Day(cell) => Some(cell),
        })
    }
}

/// Everything a view needs to draw one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum PeriodModel {
    Annual { year: i32, months: Vec<MonthGrid> },
    Monthly { month: MonthGrid },
    Weekly { days: Vec<DayCell> },
    Daily { day: DayCell },
}

impl PeriodModel {
    pub fn view_mode(&self) -> ViewMode {
        match self {
            PeriodModel::Annual { .. } => ViewMode::Annual,
            PeriodModel::Monthly { .. } => ViewMode::Monthly,
            PeriodModel::Weekly { .. } => ViewMode::Weekly,
            PeriodModel::Daily { .. } => ViewMode::Daily,
        }
    }

    /// Every day cell in the model, in display order.
    pub fn day_cells(&self) -> Vec<&DayCell> {
        match self {
            PeriodModel::Annual { months, .. } => months.iter().flat_map(MonthGrid::days).collect(),
            PeriodModel::Monthly { month } => month.days().collect(),
            PeriodModel::Weekly { days } => days.iter().collect(),
            PeriodModel::Daily { day } => vec![day],
        }
    }

    /// Flag the cell for `today`, if the period contains it.
    pub fn mark_today(&mut self, today: NaiveDate) {
        let mark = |cell: &mut DayCell| cell.is_today = cell.date == today;
        match self {
            PeriodModel::Annual { months, .. } => {
                months.iter_mut().flat_map(MonthGrid::days_mut).for_each(mark)
            }
            PeriodModel::Monthly { month } => month.days_mut().for_each(mark),
            PeriodModel::Weekly { days } => days.iter_mut().for_each(mark),
            PeriodModel::Daily { day } => mark(day),
        }
    }
}

/// Events grouped by calendar date.
struct DateIndex<'a> {
    by_date: HashMap<NaiveDate, Vec<&'a Event>>,
}

impl<'a> DateIndex<'a> {
    fn new(events: &'a [Event]) -> Self {
        let mut by_date: HashMap<NaiveDate, Vec<&'a Event>> = HashMap::new();
        for event in events {
            by_date.entry(event.date).or_default().push(event);
        }
        for bucket in by_date.values_mut() {
            bucket.sort_by(|a, b| agenda_order(a, b));
        }
        Self { by_date }
    }

    fn has_events(&self, date: NaiveDate) -> bool {
        self.by_date.contains_key(&date)
    }

    fn events_on(&self, date: NaiveDate) -> Vec<Event> {
        self.by_date
            .get(&date)
            .map(|bucket| bucket.iter().map(|e| (*e).clone()).collect())
            .unwrap_or_default()
    }

    fn cell(&self, date: NaiveDate, with_events: bool) -> DayCell {
        let events = if with_events {
            self.events_on(date)
        } else {
            Vec::new()
        };
        DayCell::new(date, events, self.has_events(date))
    }
}

/// Accepted clock formats for ordering. `%H` also takes a single digit.
const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

fn parse_time(input: &str) -> Option<NaiveTime> {
    let trimmed = input.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
}

/// Clock times in time order, then unparseable times as text.
fn time_order(a: &str, b: &str) -> std::cmp::Ordering {
    match (parse_time(a), parse_time(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Timed events first by time, then untimed ones, ties broken by title.
fn agenda_order(a: &Event, b: &Event) -> std::cmp::Ordering {
    match (&a.time, &b.time) {
        (Some(x), Some(y)) => time_order(x, y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    }
    .then_with(|| a.title.cmp(&b.title))
}

/// Compute the period model for `reference` in `mode`.
///
/// Pure: the same inputs always produce the same model. `is_today` is left
/// unset; call `PeriodModel::mark_today` to flag the current day.
pub fn project(reference: NaiveDate, mode: ViewMode, events: &[Event]) -> PeriodModel {
    let index = DateIndex::new(events);

    let model = match mode {
        ViewMode::Monthly => PeriodModel::Monthly {
            month: month_grid(first_day(reference), &index, true),
        },
        ViewMode::Weekly => {
            let start = week_start(reference);
            PeriodModel::Weekly {
                days: consecutive_days(start, DAYS_PER_WEEK)
                    .map(|date| index.cell(date, true))
                    .collect(),
            }
        }
        ViewMode::Daily => PeriodModel::Daily {
            day: index.cell(reference, true),
        },
        ViewMode::Annual => {
            let january = reference.with_ordinal(1).unwrap_or(reference);
            let months = (1..=12)
                .filter_map(|month| january.with_month(month))
                .enumerate()
                .map(|(i, first)| {
                    let mut grid = month_grid(first, &index, false);
                    grid.row = i / ANNUAL_COLUMNS;
                    grid.column = i % ANNUAL_COLUMNS;
                    grid
                })
                .collect();
            PeriodModel::Annual {
                year: reference.year(),
                months,
            }
        }
    };

    tracing::debug!(
        "Projected {} view for {} over {} events",
        mode,
        reference,
        events.len()
    );
    model
}

fn first_day(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn consecutive_days(start: NaiveDate, count: usize) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take(count)
}

fn month_grid(first: NaiveDate, index: &DateIndex<'_>, with_events: bool) -> MonthGrid {
    let blanks = first.weekday().num_days_from_sunday() as usize;
    let length = month_length(first) as usize;

    let mut cells = Vec::with_capacity(blanks + length);
    cells.extend(std::iter::repeat(GridCell::Blank).take(blanks));
    cells.extend(
        consecutive_days(first, length).map(|date| GridCell::Day(index.cell(date, with_events))),
    );

    MonthGrid {
        year: first.year(),
        month0: first.month0(),
        title: period_title(first, ViewMode::Monthly),
        cells,
        row: 0,
        column: 0,
    }
}
