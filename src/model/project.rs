use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::stage::StageDate;

/// A top-level project containing campaigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    /// Planned end.
    pub end_date: Option<NaiveDate>,
    /// Set once the project has actually finished.
    pub actual_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub stage_dates: Vec<StageDate>,
    #[serde(default)]
    pub description: String,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_date: None,
            end_date: None,
            actual_end_date: None,
            stage_dates: Vec::new(),
            description: String::new(),
        }
    }

    pub fn scheduled(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn is_completed(&self) -> bool {
        self.actual_end_date.is_some()
    }

    /// The end the calendar shows: the actual end if finished, else the plan.
    pub fn effective_end(&self) -> Option<NaiveDate> {
        self.actual_end_date.or(self.end_date)
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.start_date?;
        let end = self.effective_end()?;
        Some((start, end.max(start)))
    }
}
