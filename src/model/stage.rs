use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dated stage marker attached to a project or campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDate {
    pub stage_id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
}

impl StageDate {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            stage_id: Uuid::new_v4(),
            name: name.into(),
            date,
            completed: false,
        }
    }
}

/// Return a copy of `stages` with the stage `stage_id` moved to `date`.
///
/// `None` when no such stage exists.
pub fn with_stage_moved(stages: &[StageDate], stage_id: Uuid, date: NaiveDate) -> Option<Vec<StageDate>> {
    if !stages.iter().any(|s| s.stage_id == stage_id) {
        return None;
    }
    Some(
        stages
            .iter()
            .map(|s| {
                if s.stage_id == stage_id {
                    StageDate { date, ..s.clone() }
                } else {
                    s.clone()
                }
            })
            .collect(),
    )
}
