use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single piece of work, optionally scheduled inside a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    /// Containing campaign, if any.
    pub campaign_id: Option<Uuid>,
    /// Optional explicit start. When absent the task starts on its due date.
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    #[serde(default)]
    pub description: String,
}

impl Task {
    /// Create an unscheduled task.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            campaign_id: None,
            start_date: None,
            due_date: None,
            completed: false,
            description: String::new(),
        }
    }

    /// Builder-style helper assigning a start and due date.
    pub fn scheduled(mut self, start: NaiveDate, due: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.due_date = Some(due);
        self
    }

    /// Builder-style helper placing the task inside a campaign.
    pub fn in_campaign(mut self, campaign_id: Uuid) -> Self {
        self.campaign_id = Some(campaign_id);
        self
    }

    /// The effective `[start, due]` range, or `None` while unscheduled.
    ///
    /// A missing start collapses to the due date; a start stored after the
    /// due date is clamped so the range is never inverted.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let due = self.due_date?;
        let start = self.start_date.unwrap_or(due).min(due);
        Some((start, due))
    }

    pub fn is_scheduled(&self) -> bool {
        self.due_date.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    #[test]
    fn missing_start_collapses_to_due() {
        let mut task = Task::new("Write copy");
        task.due_date = Some(d(6, 4));
        assert_eq!(task.date_range(), Some((d(6, 4), d(6, 4))));
    }

    #[test]
    fn unscheduled_task_has_no_range() {
        let mut task = Task::new("Someday");
        task.start_date = Some(d(6, 1));
        assert!(!task.is_scheduled());
        assert_eq!(task.date_range(), None);
    }

    #[test]
    fn inverted_start_is_clamped() {
        let task = Task::new("Odd").scheduled(d(6, 9), d(6, 3));
        assert_eq!(task.date_range(), Some((d(6, 3), d(6, 3))));
    }
}
