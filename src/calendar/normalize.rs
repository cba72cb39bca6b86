//! Turns planning records into calendar events.
//!
//! Output order is projects (each followed by its stages), then campaigns
//! (each followed by its stages), then tasks. Layout relies on this order
//! to break stacking ties.

use std::collections::HashMap;

use uuid::Uuid;

use super::event::{CalendarEvent, EventColor, EventSource, StageOwner};
use crate::model::{Campaign, Project, StageDate, Task};

/// Normalize every schedulable record into a [`CalendarEvent`].
pub fn normalize(tasks: &[Task], campaigns: &[Campaign], projects: &[Project]) -> Vec<CalendarEvent> {
    let mut events = Vec::with_capacity(tasks.len() + campaigns.len() + projects.len());

    for project in projects {
        events.extend(project_event(project));
        events.extend(stage_events(
            &project.stage_dates,
            StageOwner::Project(project.id),
            &project.name,
        ));
    }

    for campaign in campaigns {
        events.extend(campaign_event(campaign));
        events.extend(stage_events(
            &campaign.stage_dates,
            StageOwner::Campaign(campaign.id),
            &campaign.name,
        ));
    }

    let campaign_names: HashMap<Uuid, &str> =
        campaigns.iter().map(|c| (c.id, c.name.as_str())).collect();
    events.extend(tasks.iter().filter_map(|task| task_event(task, &campaign_names)));

    tracing::trace!(
        events = events.len(),
        tasks = tasks.len(),
        campaigns = campaigns.len(),
        projects = projects.len(),
        "normalized planner records"
    );
    events
}

fn task_event(task: &Task, campaign_names: &HashMap<Uuid, &str>) -> Option<CalendarEvent> {
    let (start, due) = task.date_range()?;
    let title = match task.campaign_id.and_then(|id| campaign_names.get(&id)) {
        Some(campaign) => format!("{} ({})", task.name, campaign),
        None => task.name.clone(),
    };
    let color = if task.completed {
        EventColor::Green
    } else {
        EventColor::Blue
    };
    let mut event = CalendarEvent::new(
        EventSource::Task {
            task_id: task.id,
            campaign_id: task.campaign_id,
        },
        title,
        start,
        due,
        color,
    );
    event.completed = task.completed;
    event.description = task.description.clone();
    Some(event)
}

fn campaign_event(campaign: &Campaign) -> Option<CalendarEvent> {
    let (start, end) = campaign.date_range()?;
    let mut event = CalendarEvent::new(
        EventSource::Campaign {
            campaign_id: campaign.id,
            project_id: campaign.project_id,
        },
        campaign.name.clone(),
        start,
        end,
        EventColor::Orange,
    );
    event.description = campaign.description.clone();
    Some(event)
}

fn project_event(project: &Project) -> Option<CalendarEvent> {
    let (start, end) = project.date_range()?;
    let completed = project.is_completed();
    let (title, color) = if completed {
        (format!("{} (completed)", project.name), EventColor::Green)
    } else {
        (project.name.clone(), EventColor::Purple)
    };
    let mut event = CalendarEvent::new(
        EventSource::Project {
            project_id: project.id,
        },
        title,
        start,
        end,
        color,
    );
    event.completed = completed;
    event.description = project.description.clone();
    Some(event)
}

fn stage_events<'a>(
    stages: &'a [StageDate],
    owner: StageOwner,
    owner_name: &'a str,
) -> impl Iterator<Item = CalendarEvent> + 'a {
    stages.iter().map(move |stage| {
        let color = if stage.completed {
            EventColor::Green
        } else {
            EventColor::Teal
        };
        let mut event = CalendarEvent::new(
            EventSource::Stage {
                stage_id: stage.stage_id,
                owner,
            },
            format!("{} · {}", stage.name, owner_name),
            stage.date,
            stage.date,
            color,
        );
        event.completed = stage.completed;
        event
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::event::EventKind;
    use chrono::NaiveDate;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    #[test]
    fn task_without_due_date_is_skipped() {
        let mut task = Task::new("Loose end");
        task.start_date = Some(d(6, 1));
        assert!(normalize(&[task], &[], &[]).is_empty());
    }

    #[test]
    fn task_title_carries_campaign_name() {
        let campaign = Campaign::new("Summer Sale").scheduled(d(6, 1), d(6, 10));
        let mut task = Task::new("Banner").in_campaign(campaign.id);
        task.due_date = Some(d(6, 4));

        let events = normalize(&[task.clone()], &[campaign], &[]);
        let event = events.last().unwrap();
        assert_eq!(event.title, "Banner (Summer Sale)");
        assert_eq!(event.id, format!("task-{}", task.id));
        assert_eq!((event.start, event.end), (d(6, 4), d(6, 4)));
        assert_eq!(event.color, EventColor::Blue);
    }

    #[test]
    fn completed_task_is_green() {
        let mut task = Task::new("Done").scheduled(d(6, 1), d(6, 2));
        task.completed = true;
        let events = normalize(&[task], &[], &[]);
        assert_eq!(events[0].color, EventColor::Green);
        assert!(events[0].completed);
    }

    #[test]
    fn campaign_needs_both_dates_but_stages_always_emit() {
        let mut campaign = Campaign::new("Half planned");
        campaign.start_date = Some(d(6, 1));
        campaign.stage_dates.push(StageDate::new("Kickoff", d(6, 2)));

        let events = normalize(&[], &[campaign], &[]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), EventKind::Stage);
        assert_eq!(events[0].title, "Kickoff · Half planned");
    }

    #[test]
    fn project_actual_end_marks_completion() {
        let mut project = Project::new("Rebrand").scheduled(d(5, 1), d(5, 20));
        project.actual_end_date = Some(d(5, 24));
        let events = normalize(&[], &[], &[project]);
        assert_eq!(events[0].title, "Rebrand (completed)");
        assert_eq!(events[0].end, d(5, 24));
        assert_eq!(events[0].color, EventColor::Green);

        let open = Project::new("Next").scheduled(d(5, 1), d(5, 20));
        assert_eq!(normalize(&[], &[], &[open])[0].color, EventColor::Purple);
    }

    #[test]
    fn output_orders_projects_then_campaigns_then_tasks() {
        let mut project = Project::new("P").scheduled(d(6, 1), d(6, 30));
        project.stage_dates.push(StageDate::new("Gate", d(6, 15)));
        let campaign = Campaign::new("C").scheduled(d(6, 2), d(6, 9));
        let task = Task::new("T").scheduled(d(6, 3), d(6, 4));

        let kinds: Vec<EventKind> = normalize(&[task], &[campaign], &[project])
            .iter()
            .map(CalendarEvent::kind)
            .collect();
        assert_eq!(
            kinds,
            vec![EventKind::Project, EventKind::Stage, EventKind::Campaign, EventKind::Task]
        );
    }
}
