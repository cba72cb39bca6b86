//! End-to-end scheduling scenarios: gesture → intent → plan → store.

use campaign_planner::calendar::{
    layout_rows_bounded, normalize, plan_change, schedule_drop, segment_all, DropItem, EventTarget,
    InteractionController, PointerPos, ReleaseOutcome, ResizeHandle,
};
use campaign_planner::calendar::schedule::{apply_change, execute_plan};
use campaign_planner::model::{CalendarView, Campaign, Project, Task, ViewMode, Workspace};
use campaign_planner::store::{
    CampaignPatch, CampaignUpdater, ProjectPatch, ProjectUpdater, TaskPatch, TaskUpdater,
};
use campaign_planner::{ScheduleError, StoreError};
use chrono::{NaiveDate, Weekday};
use uuid::Uuid;

fn jun(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
}

/// Wraps a workspace and counts every persistence call.
struct CountingStore<'a> {
    inner: &'a mut Workspace,
    calls: usize,
}

impl TaskUpdater for CountingStore<'_> {
    fn update_task(&mut self, id: Uuid, patch: TaskPatch) -> Result<(), StoreError> {
        self.calls += 1;
        self.inner.update_task(id, patch)
    }
}

impl CampaignUpdater for CountingStore<'_> {
    fn update_campaign(&mut self, id: Uuid, patch: CampaignPatch) -> Result<(), StoreError> {
        self.calls += 1;
        self.inner.update_campaign(id, patch)
    }
}

impl ProjectUpdater for CountingStore<'_> {
    fn update_project(&mut self, id: Uuid, patch: ProjectPatch) -> Result<(), StoreError> {
        self.calls += 1;
        self.inner.update_project(id, patch)
    }
}

fn campaign_with_task(
    campaign: (u32, u32),
    task: (u32, u32),
) -> (Workspace, Uuid, Uuid) {
    let mut ws = Workspace::new("scenario");
    let c = Campaign::new("C").scheduled(jun(campaign.0), jun(campaign.1));
    let t = Task::new("T").in_campaign(c.id).scheduled(jun(task.0), jun(task.1));
    let ids = (c.id, t.id);
    ws.campaigns.push(c);
    ws.tasks.push(t);
    (ws, ids.0, ids.1)
}

#[test]
fn moving_a_campaign_carries_its_tasks() {
    let (mut ws, campaign_id, task_id) = campaign_with_task((1, 10), (2, 3));
    let events = normalize(&ws.tasks, &ws.campaigns, &ws.projects);
    let campaign_event = events.iter().find(|e| e.id == format!("campaign-{campaign_id}")).unwrap();

    let mut ctl = InteractionController::default();
    ctl.begin_move(campaign_event).unwrap();
    ctl.update_hover(Some(jun(5)));
    let intent = ctl.commit().unwrap();
    assert_eq!((intent.start, intent.end), (jun(5), jun(14)));

    let plan = plan_change(&ws, &intent, false).unwrap();
    let stats = plan.stats.unwrap();
    assert_eq!((stats.affected_count, stats.days_difference), (1, 4));

    let report = execute_plan(plan, &mut ws).unwrap();
    assert!(report.is_complete());
    assert_eq!(ws.task(task_id).unwrap().date_range(), Some((jun(6), jun(7))));
}

#[test]
fn shrinking_a_campaign_clamps_its_tasks() {
    let (mut ws, campaign_id, task_id) = campaign_with_task((1, 10), (8, 9));
    let events = normalize(&ws.tasks, &ws.campaigns, &ws.projects);
    let campaign_event = events.iter().find(|e| e.id == format!("campaign-{campaign_id}")).unwrap();

    let mut ctl = InteractionController::default();
    ctl.begin_resize(campaign_event, ResizeHandle::End).unwrap();
    ctl.update_hover(Some(jun(3)));
    let intent = ctl.commit().unwrap();

    apply_change(&mut ws, &intent, true).unwrap();
    assert_eq!(ws.campaign(campaign_id).unwrap().date_range(), Some((jun(1), jun(3))));
    assert_eq!(ws.task(task_id).unwrap().date_range(), Some((jun(3), jun(3))));
}

#[test]
fn task_in_campaign_without_end_is_rejected_before_persistence() {
    let mut ws = Workspace::new("scenario");
    let mut campaign = Campaign::new("Open ended");
    campaign.start_date = Some(jun(1));
    let task = Task::new("T").in_campaign(campaign.id).scheduled(jun(2), jun(2));
    ws.campaigns.push(campaign);
    ws.tasks.push(task.clone());

    let events = normalize(&ws.tasks, &ws.campaigns, &ws.projects);
    let mut ctl = InteractionController::default();
    ctl.begin_move(&events[0]).unwrap();
    ctl.update_hover(Some(jun(4)));
    let intent = ctl.commit().unwrap();

    let snapshot = ws.clone();
    let mut store = CountingStore {
        inner: &mut ws,
        calls: 0,
    };
    let result = plan_change(&snapshot, &intent, true).and_then(|plan| execute_plan(plan, &mut store));
    assert!(matches!(result, Err(ScheduleError::ContainerUnscheduled { .. })));
    assert_eq!(store.calls, 0);
    assert_eq!(ws.task(task.id).unwrap(), &task);
}

#[test]
fn dropping_an_unscheduled_project_schedules_two_days() {
    let mut ws = Workspace::new("scenario");
    let project = Project::new("Autumn push");
    let id = project.id;
    ws.projects.push(project);

    let item = DropItem {
        target: EventTarget::Project(id),
        title: "Autumn push".into(),
    };
    let intent = schedule_drop(&item, jun(12));
    apply_change(&mut ws, &intent, true).unwrap();

    assert_eq!(ws.project(id).unwrap().date_range(), Some((jun(12), jun(13))));
    let events = normalize(&ws.tasks, &ws.campaigns, &ws.projects);
    assert_eq!((events[0].start, events[0].end), (jun(12), jun(13)));
}

#[test]
fn project_move_cascades_two_levels() {
    let mut ws = Workspace::new("scenario");
    let project = Project::new("Year").scheduled(jun(1), jun(30));
    let campaign = Campaign::new("Push").in_project(project.id).scheduled(jun(2), jun(6));
    let task = Task::new("Post").in_campaign(campaign.id).scheduled(jun(3), jun(4));
    let (project_id, campaign_id, task_id) = (project.id, campaign.id, task.id);
    ws.projects.push(project);
    ws.campaigns.push(campaign);
    ws.tasks.push(task);

    let events = normalize(&ws.tasks, &ws.campaigns, &ws.projects);
    let mut ctl = InteractionController::default();
    let project_event = &events[0];
    ctl.press(project_event, PointerPos::new(0.0, 0.0)).unwrap();
    ctl.pointer_moved(PointerPos::new(40.0, 0.0), &|_x: f32, _y: f32| Some(jun(8)));
    let ReleaseOutcome::Committed(intent) = ctl.release() else {
        panic!("expected the drag to commit");
    };

    let report = apply_change(&mut ws, &intent, true).unwrap();
    assert_eq!((report.attempted, report.applied), (2, 2));
    assert_eq!(ws.project(project_id).unwrap().date_range(), Some((jun(8), NaiveDate::from_ymd_opt(2025, 7, 7).unwrap())));
    assert_eq!(ws.campaign(campaign_id).unwrap().date_range(), Some((jun(9), jun(13))));
    assert_eq!(ws.task(task_id).unwrap().date_range(), Some((jun(10), jun(11))));
}

#[test]
fn month_view_pipeline_lays_out_without_overlap() {
    let mut ws = Workspace::new("scenario");
    let project = Project::new("Year").scheduled(jun(1), jun(30));
    let campaign = Campaign::new("Push").in_project(project.id).scheduled(jun(2), jun(13));
    let tasks = [
        Task::new("a").in_campaign(campaign.id).scheduled(jun(3), jun(4)),
        Task::new("b").in_campaign(campaign.id).scheduled(jun(4), jun(5)),
        Task::new("c").in_campaign(campaign.id).scheduled(jun(9), jun(9)),
    ];
    ws.projects.push(project);
    ws.campaigns.push(campaign);
    ws.tasks.extend(tasks);

    let view = CalendarView::new(jun(15), ViewMode::Month, Weekday::Mon);
    let window = view.window();
    let events = normalize(&ws.tasks, &ws.campaigns, &ws.projects);
    let segments = segment_all(&events, &window);
    let rows = layout_rows_bounded(&segments, 2);

    // Week of June 2nd: project, campaign, then a and b stacked.
    let week = &rows[&1];
    assert_eq!(week.visible_layers.len(), 2);
    assert_eq!(week.visible_layers[0][0].event.title, "Year");
    assert_eq!(week.visible_layers[1][0].event.title, "Push");
    assert_eq!(week.hidden_count, 2);
    assert_eq!(week.hidden_by_col[2], 2);

    for row in rows.values() {
        for layer in &row.visible_layers {
            for (i, a) in layer.iter().enumerate() {
                for b in &layer[i + 1..] {
                    assert!(!a.overlaps_columns(b));
                }
            }
        }
    }
}
