//! Persistence capabilities the calendar core writes through.
//!
//! The core never stores anything itself; it hands patches to these traits.
//! [`Workspace`] implements all three by applying the patch in memory.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{StageDate, Workspace};

/// Fields to overwrite on a task. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignPatch {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub stage_dates: Option<Vec<StageDate>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub stage_dates: Option<Vec<StageDate>>,
}

pub trait TaskUpdater {
    fn update_task(&mut self, id: Uuid, patch: TaskPatch) -> Result<(), StoreError>;
}

pub trait CampaignUpdater {
    fn update_campaign(&mut self, id: Uuid, patch: CampaignPatch) -> Result<(), StoreError>;
}

pub trait ProjectUpdater {
    fn update_project(&mut self, id: Uuid, patch: ProjectPatch) -> Result<(), StoreError>;
}

/// Everything the scheduler needs to persist a change.
pub trait PlannerStore: TaskUpdater + CampaignUpdater + ProjectUpdater {}

impl<T> PlannerStore for T where T: TaskUpdater + CampaignUpdater + ProjectUpdater {}

impl TaskUpdater for Workspace {
    fn update_task(&mut self, id: Uuid, patch: TaskPatch) -> Result<(), StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound { kind: "task", id })?;
        if let Some(start) = patch.start_date {
            task.start_date = Some(start);
        }
        if let Some(due) = patch.due_date {
            task.due_date = Some(due);
        }
        self.touch();
        Ok(())
    }
}

impl CampaignUpdater for Workspace {
    fn update_campaign(&mut self, id: Uuid, patch: CampaignPatch) -> Result<(), StoreError> {
        let campaign = self
            .campaigns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound {
                kind: "campaign",
                id,
            })?;
        if let Some(start) = patch.start_date {
            campaign.start_date = Some(start);
        }
        if let Some(end) = patch.end_date {
            campaign.end_date = Some(end);
        }
        if let Some(stages) = patch.stage_dates {
            campaign.stage_dates = stages;
        }
        self.touch();
        Ok(())
    }
}

impl ProjectUpdater for Workspace {
    fn update_project(&mut self, id: Uuid, patch: ProjectPatch) -> Result<(), StoreError> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound { kind: "project", id })?;
        if let Some(start) = patch.start_date {
            project.start_date = Some(start);
        }
        if let Some(end) = patch.end_date {
            // A finished project shows its actual end, so that is what moves.
            if project.actual_end_date.is_some() {
                project.actual_end_date = Some(end);
            } else {
                project.end_date = Some(end);
            }
        }
        if let Some(stages) = patch.stage_dates {
            project.stage_dates = stages;
        }
        self.touch();
        Ok(())
    }
}
