//! Terminal rendering of the projected calendar.
//!
//! Extension traits that turn scheduler view types into colored text using
//! owo_colors.

use owo_colors::OwoColorize;
use scheduler_app::{Notice, NoticeLevel, ViewState};
use scheduler_calendar::projector::{ANNUAL_COLUMNS, DAYS_PER_WEEK};
use scheduler_calendar::{DayCell, Event, GridCell, MonthGrid, PeriodModel};

const WEEKDAY_HEADER: &str = "Su Mo Tu We Th Fr Sa";
/// Width of one rendered month grid, including the trailing gap.
const MONTH_WIDTH: usize = 22;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for ViewState {
    fn render(&self) -> String {
        let mut lines = vec![self.title.bold().to_string()];
        if let Some(pending) = self.pending {
            lines.push(format!("({} in progress)", pending).dimmed().to_string());
        }
        lines.push(String::new());
        lines.push(self.period.render());
        lines.join("\n")
    }
}

impl Render for PeriodModel {
    fn render(&self) -> String {
        match self {
            PeriodModel::Annual { months, .. } => render_year(months),
            PeriodModel::Monthly { month } => {
                let mut lines = month_lines(month, true);
                let agenda = agenda(month.days());
                if !agenda.is_empty() {
                    lines.push(String::new());
                    lines.extend(agenda);
                }
                lines.join("\n")
            }
            PeriodModel::Weekly { days } => days
                .iter()
                .map(|day| day.render())
                .collect::<Vec<_>>()
                .join("\n"),
            PeriodModel::Daily { day } => day.render(),
        }
    }
}

impl Render for DayCell {
    fn render(&self) -> String {
        let heading = self.date.format("%a %-m/%-d").to_string();
        let heading = if self.is_today {
            heading.green().bold().to_string()
        } else {
            heading.bold().to_string()
        };

        let mut lines = vec![heading];
        if self.events.is_empty() {
            lines.push(format!("   {}", "no events".dimmed()));
        }
        lines.extend(self.events.iter().map(|e| format!("   {}", e.render())));
        lines.join("\n")
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let mut line = match &self.time {
            Some(time) => format!("{} {}", time.cyan(), self.title),
            None => self.title.clone(),
        };
        if let Some(description) = &self.description {
            line.push_str(&format!(" - {}", description.dimmed()));
        }
        format!("{} {}", line, format!("[{}]", self.id).dimmed())
    }
}

impl Render for Notice {
    fn render(&self) -> String {
        match self.level {
            NoticeLevel::Info => self.message.clone(),
            NoticeLevel::Warning => self.message.yellow().to_string(),
            NoticeLevel::Error => self.message.red().to_string(),
        }
    }
}

/// Plain-width grid lines for one month. Colors never change cell width.
fn month_lines(month: &MonthGrid, with_title: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if with_title {
        lines.push(pad(&month.title, MONTH_WIDTH - 2));
    }
    lines.push(WEEKDAY_HEADER.to_string());

    for week in month.weeks() {
        let mut cells: Vec<String> = week.iter().map(grid_cell).collect();
        cells.resize(DAYS_PER_WEEK, "  ".to_string());
        lines.push(cells.join(" "));
    }
    lines
}

fn grid_cell(cell: &GridCell) -> String {
    match cell {
        GridCell::Blank => "  ".to_string(),
        GridCell::Day(day) => {
            let text = format!("{:>2}", day.day());
            if day.is_today {
                text.reversed().to_string()
            } else if day.has_events {
                text.yellow().underline().to_string()
            } else {
                text
            }
        }
    }
}

fn render_year(months: &[MonthGrid]) -> String {
    months
        .chunks(ANNUAL_COLUMNS)
        .map(|row| {
            let grids: Vec<Vec<String>> = row.iter().map(|m| month_lines(m, true)).collect();
            let height = grids.iter().map(Vec::len).max().unwrap_or(0);
            (0..height)
                .map(|i| {
                    grids
                        .iter()
                        .map(|g| match g.get(i) {
                            Some(line) => format!("{}  ", line),
                            None => " ".repeat(MONTH_WIDTH),
                        })
                        .collect::<String>()
                        .trim_end()
                        .to_string()
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn agenda<'a>(days: impl Iterator<Item = &'a DayCell>) -> Vec<String> {
    days.filter(|d| !d.events.is_empty())
        .flat_map(|d| {
            let date = d.date.format("%-m/%-d").to_string();
            d.events
                .iter()
                .map(move |e| format!("{:>5}  {}", date, e.render()))
        })
        .collect()
}

fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use scheduler_calendar::{project, ViewMode};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn standup() -> Event {
        Event {
            id: "e1".to_string(),
            title: "Standup".to_string(),
            date: date(2024, 2, 10),
            time: Some("09:00".to_string()),
            description: None,
        }
    }

    #[test]
    fn test_month_has_header_and_agenda() {
        let model = project(date(2024, 2, 15), ViewMode::Monthly, &[standup()]);
        let text = model.render();

        assert!(text.contains("February 2024"));
        assert!(text.contains(WEEKDAY_HEADER));
        assert!(text.contains("Standup"));
        assert!(text.contains("29"));
    }

    #[test]
    fn test_month_rows_are_weeks() {
        let PeriodModel::Monthly { month } = project(date(2024, 2, 1), ViewMode::Monthly, &[])
        else {
            panic!("expected monthly model");
        };
        // title + header + 5 week rows
        assert_eq!(month_lines(&month, true).len(), 7);
    }

    #[test]
    fn test_week_lists_every_day() {
        let model = project(date(2024, 2, 14), ViewMode::Weekly, &[standup()]);
        let text = model.render();

        assert!(text.contains("Sun 2/11"));
        assert!(text.contains("Sat 2/17"));
        assert!(text.contains("Standup"));
    }

    #[test]
    fn test_year_shows_all_months() {
        let text = project(date(2024, 6, 1), ViewMode::Annual, &[]).render();
        for name in ["January", "June", "December"] {
            assert!(text.contains(name), "missing {}", name);
        }
    }
}
