use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Which grid the calendar renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    /// Fixed six-week grid around one month.
    Month,
    /// Continuously scrolling grid spanning several months.
    Continuous { months: u32 },
}

/// The inclusive range of days a grid shows, starting on a week boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl CalendarWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end: end.max(start) }
    }

    /// Number of week rows, counting a trailing partial week as a row.
    pub fn rows(&self) -> usize {
        let days = (self.end - self.start).num_days() + 1;
        ((days + 6) / 7) as usize
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// First day of a week row. Used as the row key for expansion state.
    pub fn row_start(&self, row: usize) -> NaiveDate {
        self.start + chrono::Duration::days(row as i64 * 7)
    }

    /// Date shown in cell `(row, col)`.
    pub fn cell_date(&self, row: usize, col: usize) -> NaiveDate {
        self.row_start(row) + chrono::Duration::days(col as i64)
    }

    /// Inverse of [`cell_date`](Self::cell_date); `None` outside the window.
    pub fn cell_of(&self, date: NaiveDate) -> Option<(usize, usize)> {
        if !self.contains(date) {
            return None;
        }
        let days = (date - self.start).num_days() as usize;
        Some((days / 7, days % 7))
    }
}

/// Manages which part of the calendar is visible.
#[derive(Debug, Clone)]
pub struct CalendarView {
    pub mode: ViewMode,
    /// First day of the (first) displayed month.
    pub anchor: NaiveDate,
    pub week_start: Weekday,
}

impl CalendarView {
    pub fn new(today: NaiveDate, mode: ViewMode, week_start: Weekday) -> Self {
        Self {
            mode,
            anchor: first_of_month(today),
            week_start,
        }
    }

    /// The visible window for the current mode and anchor.
    pub fn window(&self) -> CalendarWindow {
        let start = self.week_floor(self.anchor);
        let end = match self.mode {
            ViewMode::Month => start + chrono::Duration::days(41),
            ViewMode::Continuous { months } => {
                let last = self
                    .anchor
                    .checked_add_months(Months::new(months.max(1)))
                    .map(|next| next - chrono::Duration::days(1))
                    .unwrap_or(self.anchor);
                self.week_floor(last) + chrono::Duration::days(6)
            }
        };
        CalendarWindow::new(start, end)
    }

    /// Move forward one month.
    pub fn next(&mut self) {
        self.anchor = self
            .anchor
            .checked_add_months(Months::new(1))
            .unwrap_or(self.anchor);
    }

    /// Move back one month.
    pub fn prev(&mut self) {
        self.anchor = self
            .anchor
            .checked_sub_months(Months::new(1))
            .unwrap_or(self.anchor);
    }

    /// Jump to the month containing `date`.
    pub fn go_to(&mut self, date: NaiveDate) {
        self.anchor = first_of_month(date);
    }

    /// Heading for the toolbar, e.g. `June 2025` or `Jun 2025 – Aug 2025`.
    pub fn title(&self) -> String {
        match self.mode {
            ViewMode::Month => self.anchor.format("%B %Y").to_string(),
            ViewMode::Continuous { months } if months > 1 => {
                let last = self
                    .anchor
                    .checked_add_months(Months::new(months - 1))
                    .unwrap_or(self.anchor);
                format!("{} – {}", self.anchor.format("%b %Y"), last.format("%b %Y"))
            }
            ViewMode::Continuous { .. } => self.anchor.format("%B %Y").to_string(),
        }
    }

    fn week_floor(&self, date: NaiveDate) -> NaiveDate {
        let offset = (date.weekday().num_days_from_monday() + 7
            - self.week_start.num_days_from_monday())
            % 7;
        date - chrono::Duration::days(offset as i64)
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn month_grid_is_six_weeks_from_week_start() {
        // June 1st 2025 is a Sunday.
        let view = CalendarView::new(d(2025, 6, 14), ViewMode::Month, Weekday::Mon);
        let window = view.window();
        assert_eq!(window.start, d(2025, 5, 26));
        assert_eq!(window.end, d(2025, 7, 6));
        assert_eq!(window.rows(), 6);

        let sunday_first = CalendarView::new(d(2025, 6, 14), ViewMode::Month, Weekday::Sun);
        assert_eq!(sunday_first.window().start, d(2025, 6, 1));
    }

    #[test]
    fn continuous_window_covers_every_month() {
        let view = CalendarView::new(d(2025, 6, 3), ViewMode::Continuous { months: 3 }, Weekday::Mon);
        let window = view.window();
        assert_eq!(window.start, d(2025, 5, 26));
        // August 31st 2025 is a Sunday, so the last row ends on it.
        assert_eq!(window.end, d(2025, 8, 31));
        assert_eq!(window.rows(), 14);
    }

    #[test]
    fn cell_lookup_round_trips() {
        let window = CalendarWindow::new(d(2025, 5, 26), d(2025, 7, 6));
        assert_eq!(window.cell_of(d(2025, 6, 12)), Some((2, 3)));
        assert_eq!(window.cell_date(2, 3), d(2025, 6, 12));
        assert_eq!(window.cell_of(d(2025, 7, 7)), None);
    }

    #[test]
    fn navigation_moves_by_month() {
        let mut view = CalendarView::new(d(2025, 1, 31), ViewMode::Month, Weekday::Mon);
        view.prev();
        assert_eq!(view.anchor, d(2024, 12, 1));
        view.next();
        view.next();
        assert_eq!(view.anchor, d(2025, 2, 1));
        view.go_to(d(2026, 10, 18));
        assert_eq!(view.title(), "October 2026");
    }
}
