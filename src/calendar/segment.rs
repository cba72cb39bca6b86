//! Splits events into one piece per week row of the visible grid.

use chrono::NaiveDate;

use super::event::CalendarEvent;
use crate::model::CalendarWindow;

/// The part of an event that falls within a single week row.
///
/// Segments are derived on every render and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSegment<'a> {
    pub event: &'a CalendarEvent,
    pub segment_start: NaiveDate,
    pub segment_end: NaiveDate,
    /// Touches the event's real start (not just the window edge).
    pub is_start: bool,
    /// Touches the event's real end.
    pub is_end: bool,
    pub row: usize,
    /// Weekday column, 0..=6.
    pub start_col: usize,
    /// Inclusive day count, 1..=7.
    pub span: usize,
}

impl EventSegment<'_> {
    /// Last column covered by the segment.
    pub fn end_col(&self) -> usize {
        self.start_col + self.span - 1
    }

    pub fn overlaps_columns(&self, other: &EventSegment<'_>) -> bool {
        self.start_col <= other.end_col() && other.start_col <= self.end_col()
    }

    pub fn covers_col(&self, col: usize) -> bool {
        col >= self.start_col && col <= self.end_col()
    }
}

/// Segment one event against the window `[window_start, window_end]`.
///
/// `window_start` is expected to sit on a week boundary; rows and columns
/// are counted from it.
pub fn segment(
    event: &CalendarEvent,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<EventSegment<'_>> {
    let clamped_start = event.start.max(window_start);
    let clamped_end = event.end.min(window_end);
    if clamped_start > clamped_end {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut cursor = clamped_start;
    while cursor <= clamped_end {
        let offset = (cursor - window_start).num_days() as usize;
        let row = offset / 7;
        let start_col = offset % 7;
        let week_end = window_start + chrono::Duration::days((row * 7 + 6) as i64);
        let segment_end = clamped_end.min(week_end);
        let span = (segment_end - cursor).num_days() as usize + 1;

        segments.push(EventSegment {
            event,
            segment_start: cursor,
            segment_end,
            is_start: cursor == event.start,
            is_end: segment_end == event.end,
            row,
            start_col,
            span,
        });

        cursor = segment_end + chrono::Duration::days(1);
    }
    segments
}

/// Segment a list of events against a window, preserving input order.
pub fn segment_all<'a>(events: &'a [CalendarEvent], window: &CalendarWindow) -> Vec<EventSegment<'a>> {
    events
        .iter()
        .flat_map(|event| segment(event, window.start, window.end))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::event::{EventColor, EventSource};
    use uuid::Uuid;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    fn event(start: NaiveDate, end: NaiveDate) -> CalendarEvent {
        CalendarEvent::new(
            EventSource::Task {
                task_id: Uuid::new_v4(),
                campaign_id: None,
            },
            "event",
            start,
            end,
            EventColor::Blue,
        )
    }

    // Monday May 26 to Sunday July 6 2025.
    fn window() -> (NaiveDate, NaiveDate) {
        (d(5, 26), d(7, 6))
    }

    #[test]
    fn single_day_event_is_one_cell() {
        let (ws, we) = window();
        let e = event(d(6, 12), d(6, 12));
        let segs = segment(&e, ws, we);
        assert_eq!(segs.len(), 1);
        let s = segs[0];
        assert_eq!((s.row, s.start_col, s.span), (2, 3, 1));
        assert!(s.is_start && s.is_end);
    }

    #[test]
    fn event_crossing_week_boundary_splits() {
        let (ws, we) = window();
        // Friday June 6 to Tuesday June 10.
        let e = event(d(6, 6), d(6, 10));
        let segs = segment(&e, ws, we);
        assert_eq!(segs.len(), 2);
        assert_eq!((segs[0].row, segs[0].start_col, segs[0].span), (1, 4, 3));
        assert!(segs[0].is_start && !segs[0].is_end);
        assert_eq!((segs[1].row, segs[1].start_col, segs[1].span), (2, 0, 2));
        assert!(!segs[1].is_start && segs[1].is_end);
    }

    #[test]
    fn clamped_edges_are_not_marked_as_boundaries() {
        let (ws, we) = window();
        let e = event(d(5, 20), d(7, 20));
        let segs = segment(&e, ws, we);
        assert_eq!(segs.len(), 6);
        assert!(segs.iter().all(|s| s.span == 7 && s.start_col == 0));
        assert!(segs.iter().all(|s| !s.is_start && !s.is_end));
    }

    #[test]
    fn event_outside_window_has_no_segments() {
        let (ws, we) = window();
        assert!(segment(&event(d(4, 1), d(4, 30)), ws, we).is_empty());
        assert!(segment(&event(d(7, 7), d(7, 8)), ws, we).is_empty());
    }
}
