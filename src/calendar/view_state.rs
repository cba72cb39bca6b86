//! Per-view UI state: which kinds are shown and which rows are expanded.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::event::{CalendarEvent, EventKind};

/// Which events make it onto the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventFilter {
    pub show_projects: bool,
    pub show_campaigns: bool,
    pub show_tasks: bool,
    pub show_stages: bool,
    pub hide_completed: bool,
}

impl Default for EventFilter {
    fn default() -> Self {
        Self {
            show_projects: true,
            show_campaigns: true,
            show_tasks: true,
            show_stages: true,
            hide_completed: false,
        }
    }
}

impl EventFilter {
    pub fn accepts(&self, event: &CalendarEvent) -> bool {
        let kind_shown = match event.kind() {
            EventKind::Project => self.show_projects,
            EventKind::Campaign => self.show_campaigns,
            EventKind::Task => self.show_tasks,
            EventKind::Stage => self.show_stages,
        };
        kind_shown && !(self.hide_completed && event.completed)
    }

    /// Keep accepted events, preserving order.
    pub fn apply(&self, mut events: Vec<CalendarEvent>) -> Vec<CalendarEvent> {
        events.retain(|e| self.accepts(e));
        events
    }
}

/// State threaded through the calendar view between frames.
#[derive(Debug, Clone, Default)]
pub struct CalendarViewState {
    pub filter: EventFilter,
    /// Week rows (keyed by their first date) showing every layer.
    expanded_rows: HashSet<NaiveDate>,
}

impl CalendarViewState {
    /// Start with every row collapsed.
    pub fn with_filter(filter: EventFilter) -> Self {
        Self {
            filter,
            expanded_rows: HashSet::new(),
        }
    }

    pub fn is_expanded(&self, row_key: NaiveDate) -> bool {
        self.expanded_rows.contains(&row_key)
    }

    pub fn set_expanded(&mut self, row_key: NaiveDate, expanded: bool) {
        if expanded {
            self.expanded_rows.insert(row_key);
        } else {
            self.expanded_rows.remove(&row_key);
        }
    }

    pub fn toggle_row(&mut self, row_key: NaiveDate) {
        let expanded = self.is_expanded(row_key);
        self.set_expanded(row_key, !expanded);
    }

    pub fn collapse_all(&mut self) {
        self.expanded_rows.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::event::{EventColor, EventSource};
    use uuid::Uuid;

    #[test]
    fn expansion_is_idempotent() {
        let key = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let mut state = CalendarViewState::default();
        state.set_expanded(key, true);
        state.set_expanded(key, true);
        assert!(state.is_expanded(key));
        state.toggle_row(key);
        assert!(!state.is_expanded(key));
    }

    #[test]
    fn with_filter_starts_collapsed() {
        let key = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let filter = EventFilter {
            show_stages: false,
            ..EventFilter::default()
        };
        let state = CalendarViewState::with_filter(filter);
        assert_eq!(state.filter, filter);
        assert!(!state.is_expanded(key));
    }

    #[test]
    fn filter_hides_kinds_and_completed() {
        let day = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let mut done = CalendarEvent::new(
            EventSource::Task {
                task_id: Uuid::new_v4(),
                campaign_id: None,
            },
            "done",
            day,
            day,
            EventColor::Green,
        );
        done.completed = true;
        let project = CalendarEvent::new(
            EventSource::Project {
                project_id: Uuid::new_v4(),
            },
            "p",
            day,
            day,
            EventColor::Purple,
        );

        let filter = EventFilter {
            show_projects: false,
            hide_completed: true,
            ..Default::default()
        };
        assert!(filter.apply(vec![done, project]).is_empty());
    }
}
