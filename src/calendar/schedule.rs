//! Validates a date change against the hierarchy and turns it into updates.
//!
//! Planning is pure: containment and prerequisites are checked and the
//! cascade is computed against a [`Workspace`] snapshot. Execution then
//! issues the updates one after another through a [`PlannerStore`]. A failed
//! dependent update is counted, not rolled back.

use chrono::NaiveDate;
use uuid::Uuid;

use super::cascade::{shift_dependents, shift_project, ShiftStats};
use super::event::StageOwner;
use super::interaction::{DateChangeIntent, EventTarget};
use crate::error::{ScheduleError, StoreError};
use crate::model::stage::with_stage_moved;
use crate::model::{Campaign, Task, Workspace};
use crate::store::{CampaignPatch, PlannerStore, ProjectPatch, TaskPatch};

/// One update to hand to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedUpdate {
    Task {
        id: Uuid,
        label: String,
        patch: TaskPatch,
    },
    Campaign {
        id: Uuid,
        label: String,
        patch: CampaignPatch,
    },
    Project {
        id: Uuid,
        label: String,
        patch: ProjectPatch,
    },
}

impl PlannedUpdate {
    pub fn label(&self) -> &str {
        match self {
            PlannedUpdate::Task { label, .. }
            | PlannedUpdate::Campaign { label, .. }
            | PlannedUpdate::Project { label, .. } => label,
        }
    }

    fn apply(self, store: &mut impl PlannerStore) -> Result<(), StoreError> {
        match self {
            PlannedUpdate::Task { id, patch, .. } => store.update_task(id, patch),
            PlannedUpdate::Campaign { id, patch, .. } => store.update_campaign(id, patch),
            PlannedUpdate::Project { id, patch, .. } => store.update_project(id, patch),
        }
    }

    fn from_task(task: &Task) -> Self {
        PlannedUpdate::Task {
            id: task.id,
            label: task.name.clone(),
            patch: TaskPatch {
                start_date: task.start_date,
                due_date: task.due_date,
            },
        }
    }

    fn from_campaign(campaign: &Campaign) -> Self {
        PlannedUpdate::Campaign {
            id: campaign.id,
            label: campaign.name.clone(),
            patch: CampaignPatch {
                start_date: campaign.start_date,
                end_date: campaign.end_date,
                stage_dates: None,
            },
        }
    }
}

/// A validated change, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulePlan {
    pub intent: DateChangeIntent,
    pub primary: PlannedUpdate,
    /// Cascaded updates, campaigns before tasks.
    pub dependents: Vec<PlannedUpdate>,
    /// Present when the target is a container with a previous start.
    pub stats: Option<ShiftStats>,
}

impl SchedulePlan {
    /// Whether the change reaches beyond its own record.
    pub fn has_cascade(&self) -> bool {
        !self.dependents.is_empty()
    }
}

/// Outcome of executing a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleReport {
    pub target: String,
    pub attempted: usize,
    pub applied: usize,
    pub failed: usize,
}

impl ScheduleReport {
    pub fn is_complete(&self) -> bool {
        self.applied == self.attempted
    }

    /// Short status line for the user.
    pub fn summary(&self) -> String {
        match (self.attempted, self.is_complete()) {
            (0, _) => format!("Rescheduled '{}'", self.target),
            (n, true) => format!("Rescheduled '{}' and {n} dependent item(s)", self.target),
            (n, false) => format!(
                "Rescheduled '{}', but only {} of {n} dependent item(s) were saved",
                self.target, self.applied
            ),
        }
    }
}

/// Validate `intent` against `workspace` and compute every resulting update.
pub fn plan_change(
    workspace: &Workspace,
    intent: &DateChangeIntent,
    clamp: bool,
) -> Result<SchedulePlan, ScheduleError> {
    let plan = match intent.target {
        EventTarget::Task(id) => plan_task(workspace, intent, id),
        EventTarget::Campaign(id) => plan_campaign(workspace, intent, id, clamp),
        EventTarget::Project(id) => plan_project(workspace, intent, id, clamp),
        EventTarget::Stage { owner, stage_id } => plan_stage(workspace, intent, owner, stage_id),
    };
    match &plan {
        Ok(plan) => tracing::debug!(
            record = plan.primary.label(),
            start = %intent.start,
            end = %intent.end,
            dependents = plan.dependents.len(),
            "planned date change"
        ),
        Err(err) => tracing::warn!(%err, "date change rejected"),
    }
    plan
}

/// Issue the plan's updates in order: the primary record, then dependents.
///
/// A primary failure aborts with [`ScheduleError::Persistence`]. Dependent
/// failures are logged and reflected in the report's counts.
pub fn execute_plan(
    plan: SchedulePlan,
    store: &mut impl PlannerStore,
) -> Result<ScheduleReport, ScheduleError> {
    let target = plan.primary.label().to_string();
    plan.primary
        .apply(store)
        .map_err(|source| ScheduleError::Persistence {
            entity: target.clone(),
            source,
        })?;

    let mut report = ScheduleReport {
        target,
        attempted: plan.dependents.len(),
        applied: 0,
        failed: 0,
    };
    for update in plan.dependents {
        let label = update.label().to_string();
        match update.apply(store) {
            Ok(()) => report.applied += 1,
            Err(err) => {
                tracing::warn!(dependent = %label, %err, "cascaded update failed");
                report.failed += 1;
            }
        }
    }
    tracing::info!(
        record = %report.target,
        applied = report.applied,
        attempted = report.attempted,
        "date change applied"
    );
    Ok(report)
}

/// Plan and execute against a workspace that is also the store.
pub fn apply_change(
    workspace: &mut Workspace,
    intent: &DateChangeIntent,
    clamp: bool,
) -> Result<ScheduleReport, ScheduleError> {
    let plan = plan_change(workspace, intent, clamp)?;
    execute_plan(plan, workspace)
}

fn ensure_within(
    child: &str,
    container: &str,
    (lo, hi): (NaiveDate, NaiveDate),
    intent: &DateChangeIntent,
) -> Result<(), ScheduleError> {
    if intent.start < lo || intent.end > hi {
        return Err(ScheduleError::ContainmentViolation {
            child: child.to_string(),
            container: container.to_string(),
            start: lo,
            end: hi,
        });
    }
    Ok(())
}

fn plan_task(
    workspace: &Workspace,
    intent: &DateChangeIntent,
    id: Uuid,
) -> Result<SchedulePlan, ScheduleError> {
    let task = workspace
        .task(id)
        .ok_or(ScheduleError::NotFound { kind: "task", id })?;

    if let Some(campaign_id) = task.campaign_id {
        let campaign = workspace
            .campaign(campaign_id)
            .ok_or_else(|| ScheduleError::MissingParent {
                kind: "campaign",
                id: campaign_id,
                child: task.name.clone(),
            })?;
        let bounds = campaign
            .date_range()
            .ok_or_else(|| ScheduleError::ContainerUnscheduled {
                container: campaign.name.clone(),
            })?;
        ensure_within(&task.name, &campaign.name, bounds, intent)?;
    }

    Ok(SchedulePlan {
        intent: *intent,
        primary: PlannedUpdate::Task {
            id,
            label: task.name.clone(),
            patch: TaskPatch {
                start_date: Some(intent.start),
                due_date: Some(intent.end),
            },
        },
        dependents: Vec::new(),
        stats: None,
    })
}

fn plan_campaign(
    workspace: &Workspace,
    intent: &DateChangeIntent,
    id: Uuid,
    clamp: bool,
) -> Result<SchedulePlan, ScheduleError> {
    let campaign = workspace.campaign(id).ok_or(ScheduleError::NotFound {
        kind: "campaign",
        id,
    })?;

    if let Some(project_id) = campaign.project_id {
        let project = workspace
            .project(project_id)
            .ok_or_else(|| ScheduleError::MissingParent {
                kind: "project",
                id: project_id,
                child: campaign.name.clone(),
            })?;
        let bounds = project
            .date_range()
            .ok_or_else(|| ScheduleError::ContainerUnscheduled {
                container: project.name.clone(),
            })?;
        ensure_within(&campaign.name, &project.name, bounds, intent)?;
    }

    let (dependents, stats) = match campaign.date_range() {
        Some((old_start, _)) => {
            let shifted =
                shift_dependents(&workspace.tasks, id, old_start, intent.start, intent.end, clamp);
            let stats = ShiftStats::new(old_start, intent.start, shifted.len());
            (shifted.iter().map(PlannedUpdate::from_task).collect(), Some(stats))
        }
        None => (Vec::new(), None),
    };

    Ok(SchedulePlan {
        intent: *intent,
        primary: PlannedUpdate::Campaign {
            id,
            label: campaign.name.clone(),
            patch: CampaignPatch {
                start_date: Some(intent.start),
                end_date: Some(intent.end),
                stage_dates: None,
            },
        },
        dependents,
        stats,
    })
}

fn plan_project(
    workspace: &Workspace,
    intent: &DateChangeIntent,
    id: Uuid,
    clamp: bool,
) -> Result<SchedulePlan, ScheduleError> {
    let project = workspace.project(id).ok_or(ScheduleError::NotFound {
        kind: "project",
        id,
    })?;

    let (dependents, stats) = match project.date_range() {
        Some((old_start, _)) => {
            let cascade = shift_project(
                &workspace.campaigns,
                &workspace.tasks,
                id,
                old_start,
                intent.start,
                intent.end,
                clamp,
            );
            let stats = ShiftStats::new(old_start, intent.start, cascade.affected_count());
            let updates = cascade
                .campaigns
                .iter()
                .map(PlannedUpdate::from_campaign)
                .chain(cascade.tasks.iter().map(PlannedUpdate::from_task))
                .collect();
            (updates, Some(stats))
        }
        None => (Vec::new(), None),
    };

    Ok(SchedulePlan {
        intent: *intent,
        primary: PlannedUpdate::Project {
            id,
            label: project.name.clone(),
            patch: ProjectPatch {
                start_date: Some(intent.start),
                end_date: Some(intent.end),
                stage_dates: None,
            },
        },
        dependents,
        stats,
    })
}

fn plan_stage(
    workspace: &Workspace,
    intent: &DateChangeIntent,
    owner: StageOwner,
    stage_id: Uuid,
) -> Result<SchedulePlan, ScheduleError> {
    let not_found = ScheduleError::NotFound {
        kind: "stage",
        id: stage_id,
    };
    let primary = match owner {
        StageOwner::Project(project_id) => {
            let project = workspace
                .project(project_id)
                .ok_or_else(|| ScheduleError::MissingParent {
                    kind: "project",
                    id: project_id,
                    child: "stage".to_string(),
                })?;
            let stages = with_stage_moved(&project.stage_dates, stage_id, intent.start)
                .ok_or(not_found)?;
            PlannedUpdate::Project {
                id: project_id,
                label: project.name.clone(),
                patch: ProjectPatch {
                    stage_dates: Some(stages),
                    ..Default::default()
                },
            }
        }
        StageOwner::Campaign(campaign_id) => {
            let campaign = workspace
                .campaign(campaign_id)
                .ok_or_else(|| ScheduleError::MissingParent {
                    kind: "campaign",
                    id: campaign_id,
                    child: "stage".to_string(),
                })?;
            let stages = with_stage_moved(&campaign.stage_dates, stage_id, intent.start)
                .ok_or(not_found)?;
            PlannedUpdate::Campaign {
                id: campaign_id,
                label: campaign.name.clone(),
                patch: CampaignPatch {
                    stage_dates: Some(stages),
                    ..Default::default()
                },
            }
        }
    };

    Ok(SchedulePlan {
        intent: *intent,
        primary,
        dependents: Vec::new(),
        stats: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::interaction::IntentOrigin;
    use crate::model::{Project, StageDate};
    use crate::store::{CampaignUpdater, ProjectUpdater, TaskUpdater};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn intent(target: EventTarget, start: u32, end: u32) -> DateChangeIntent {
        DateChangeIntent {
            target,
            start: d(start),
            end: d(end),
            origin: IntentOrigin::Move,
        }
    }

    /// Records calls and fails task updates for the ids it is told to.
    struct RecordingStore {
        calls: Vec<String>,
        failing: Vec<Uuid>,
    }

    impl TaskUpdater for RecordingStore {
        fn update_task(&mut self, id: Uuid, _patch: TaskPatch) -> Result<(), StoreError> {
            self.calls.push(format!("task {id}"));
            if self.failing.contains(&id) {
                return Err(StoreError::Rejected("offline".into()));
            }
            Ok(())
        }
    }

    impl CampaignUpdater for RecordingStore {
        fn update_campaign(&mut self, id: Uuid, _patch: CampaignPatch) -> Result<(), StoreError> {
            self.calls.push(format!("campaign {id}"));
            Ok(())
        }
    }

    impl ProjectUpdater for RecordingStore {
        fn update_project(&mut self, id: Uuid, _patch: ProjectPatch) -> Result<(), StoreError> {
            self.calls.push(format!("project {id}"));
            Ok(())
        }
    }

    #[test]
    fn task_outside_campaign_is_rejected() {
        let mut ws = Workspace::new("test");
        let campaign = Campaign::new("Launch").scheduled(d(1), d(10));
        let task = Task::new("Email").in_campaign(campaign.id).scheduled(d(2), d(3));
        let task_id = task.id;
        ws.campaigns.push(campaign);
        ws.tasks.push(task);

        let err = plan_change(&ws, &intent(EventTarget::Task(task_id), 9, 11), false).unwrap_err();
        assert!(matches!(err, ScheduleError::ContainmentViolation { .. }));
        assert!(plan_change(&ws, &intent(EventTarget::Task(task_id), 9, 10), false).is_ok());
    }

    #[test]
    fn task_with_dangling_campaign_is_missing_parent() {
        let mut ws = Workspace::new("test");
        let task = Task::new("Orphan").in_campaign(Uuid::new_v4());
        let id = task.id;
        ws.tasks.push(task);
        let err = plan_change(&ws, &intent(EventTarget::Task(id), 2, 2), false).unwrap_err();
        assert!(matches!(err, ScheduleError::MissingParent { kind: "campaign", .. }));
    }

    #[test]
    fn campaign_must_fit_its_project() {
        let mut ws = Workspace::new("test");
        let project = Project::new("Year").scheduled(d(1), d(20));
        let campaign = Campaign::new("Push").in_project(project.id).scheduled(d(2), d(5));
        let id = campaign.id;
        ws.projects.push(project);
        ws.campaigns.push(campaign);

        assert!(matches!(
            plan_change(&ws, &intent(EventTarget::Campaign(id), 18, 21), false),
            Err(ScheduleError::ContainmentViolation { .. })
        ));
    }

    #[test]
    fn stage_move_rewrites_owner_stage_list() {
        let mut ws = Workspace::new("test");
        let mut campaign = Campaign::new("Push").scheduled(d(1), d(20));
        let stage = StageDate::new("Review", d(4));
        let stage_id = stage.stage_id;
        campaign.stage_dates.push(stage);
        campaign.stage_dates.push(StageDate::new("Ship", d(18)));
        let campaign_id = campaign.id;
        ws.campaigns.push(campaign);

        let target = EventTarget::Stage {
            owner: StageOwner::Campaign(campaign_id),
            stage_id,
        };
        let report = apply_change(&mut ws, &intent(target, 7, 7), false).unwrap();
        assert!(report.is_complete());
        let dates: Vec<_> = ws.campaign(campaign_id).unwrap().stage_dates.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![d(7), d(18)]);
    }

    #[test]
    fn dependent_failures_are_counted_not_reverted() {
        let mut ws = Workspace::new("test");
        let campaign = Campaign::new("Push").scheduled(d(1), d(10));
        let a = Task::new("a").in_campaign(campaign.id).scheduled(d(2), d(3));
        let b = Task::new("b").in_campaign(campaign.id).scheduled(d(4), d(5));
        let (campaign_id, b_id) = (campaign.id, b.id);
        ws.campaigns.push(campaign);
        ws.tasks.extend([a, b]);

        let plan = plan_change(&ws, &intent(EventTarget::Campaign(campaign_id), 3, 12), false).unwrap();
        assert_eq!(plan.stats.map(|s| s.affected_count), Some(2));

        let mut store = RecordingStore {
            calls: Vec::new(),
            failing: vec![b_id],
        };
        let report = execute_plan(plan, &mut store).unwrap();
        assert_eq!(store.calls.len(), 3);
        assert!(store.calls[0].starts_with("campaign"));
        assert_eq!((report.attempted, report.applied, report.failed), (2, 1, 1));
        assert!(!report.is_complete());
        assert!(report.summary().contains("only 1 of 2"));
    }
}
