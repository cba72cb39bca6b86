//! Propagates a container's date change to the records scheduled inside it.
//!
//! When a campaign or project start moves by `Δ` days, every dated dependent
//! moves by the same `Δ`. With clamping enabled each shifted bound is then
//! pinned into the container's new range independently, so a dependent pushed
//! entirely outside collapses onto the nearest boundary.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::{Campaign, Task};

/// A record that can be scheduled inside a container.
pub trait Schedulable: Clone {
    fn id(&self) -> Uuid;
    fn container_id(&self) -> Option<Uuid>;
    fn label(&self) -> &str;
    /// `None` while unscheduled.
    fn date_range(&self) -> Option<(NaiveDate, NaiveDate)>;
    /// A copy carrying the new range.
    fn with_range(&self, start: NaiveDate, end: NaiveDate) -> Self;
}

impl Schedulable for Task {
    fn id(&self) -> Uuid {
        self.id
    }

    fn container_id(&self) -> Option<Uuid> {
        self.campaign_id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Task::date_range(self)
    }

    fn with_range(&self, start: NaiveDate, end: NaiveDate) -> Self {
        // Keep due-date-only tasks that way unless the range gained a length.
        let start_date = if self.start_date.is_some() || start != end {
            Some(start)
        } else {
            None
        };
        Task {
            start_date,
            due_date: Some(end),
            ..self.clone()
        }
    }
}

impl Schedulable for Campaign {
    fn id(&self) -> Uuid {
        self.id
    }

    fn container_id(&self) -> Option<Uuid> {
        self.project_id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Campaign::date_range(self)
    }

    fn with_range(&self, start: NaiveDate, end: NaiveDate) -> Self {
        Campaign {
            start_date: Some(start),
            end_date: Some(end),
            ..self.clone()
        }
    }
}

/// Shift `(start, end)` by `delta` days, optionally pinning both ends into `bounds`.
pub fn shift_range(
    (start, end): (NaiveDate, NaiveDate),
    delta: i64,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> (NaiveDate, NaiveDate) {
    let shift = chrono::Duration::days(delta);
    let (mut start, mut end) = (start + shift, end + shift);
    if let Some((lo, hi)) = bounds {
        start = start.clamp(lo, hi);
        end = end.clamp(lo, hi);
    }
    (start, end)
}

/// Compute the updated copies of every dependent of `container_id`.
///
/// Only dependents whose dates actually change are returned; unscheduled
/// dependents are never touched.
pub fn shift_dependents<T: Schedulable>(
    all: &[T],
    container_id: Uuid,
    old_start: NaiveDate,
    new_start: NaiveDate,
    new_end: NaiveDate,
    clamp: bool,
) -> Vec<T> {
    let delta = (new_start - old_start).num_days();
    let bounds = clamp.then_some((new_start, new_end.max(new_start)));
    all.iter()
        .filter(|item| item.container_id() == Some(container_id))
        .filter_map(|item| {
            let range = item.date_range()?;
            let shifted = shift_range(range, delta, bounds);
            (shifted != range).then(|| item.with_range(shifted.0, shifted.1))
        })
        .collect()
}

/// Result of a two-level project cascade.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectCascade {
    pub campaigns: Vec<Campaign>,
    pub tasks: Vec<Task>,
}

impl ProjectCascade {
    pub fn affected_count(&self) -> usize {
        self.campaigns.len() + self.tasks.len()
    }
}

/// Cascade a project date change to its campaigns and their tasks.
///
/// Each shifted campaign passes on its own effective delta (which clamping
/// may have changed) and its own new bounds to its tasks.
pub fn shift_project(
    campaigns: &[Campaign],
    tasks: &[Task],
    project_id: Uuid,
    old_start: NaiveDate,
    new_start: NaiveDate,
    new_end: NaiveDate,
    clamp: bool,
) -> ProjectCascade {
    let shifted = shift_dependents(campaigns, project_id, old_start, new_start, new_end, clamp);
    let mut cascade = ProjectCascade::default();
    for campaign in shifted {
        let previous = campaigns
            .iter()
            .find(|c| c.id == campaign.id)
            .and_then(Campaign::date_range);
        if let (Some((prev_start, _)), Some((start, end))) = (previous, campaign.date_range()) {
            cascade
                .tasks
                .extend(shift_dependents(tasks, campaign.id, prev_start, start, end, clamp));
        }
        cascade.campaigns.push(campaign);
    }
    cascade
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    Earlier,
    Later,
}

/// Summary used for user-facing confirmation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftStats {
    pub affected_count: usize,
    pub days_difference: i64,
    pub direction: ShiftDirection,
}

impl ShiftStats {
    pub fn new(old_start: NaiveDate, new_start: NaiveDate, affected_count: usize) -> Self {
        let delta = (new_start - old_start).num_days();
        Self {
            affected_count,
            days_difference: delta.abs(),
            direction: if delta < 0 {
                ShiftDirection::Earlier
            } else {
                ShiftDirection::Later
            },
        }
    }

    /// e.g. `3 dependent items will move 4 days later`.
    pub fn describe(&self) -> String {
        let items = if self.affected_count == 1 { "item" } else { "items" };
        if self.days_difference == 0 {
            return format!("{} dependent {items} will be adjusted", self.affected_count);
        }
        let days = if self.days_difference == 1 { "day" } else { "days" };
        let direction = match self.direction {
            ShiftDirection::Earlier => "earlier",
            ShiftDirection::Later => "later",
        };
        format!(
            "{} dependent {items} will move {} {days} {direction}",
            self.affected_count, self.days_difference
        )
    }
}

/// Statistics for [`shift_dependents`] without mutating anything.
pub fn compute_shift_stats<T: Schedulable>(
    all: &[T],
    container_id: Uuid,
    old_start: NaiveDate,
    new_start: NaiveDate,
    new_end: NaiveDate,
    clamp: bool,
) -> ShiftStats {
    let affected = shift_dependents(all, container_id, old_start, new_start, new_end, clamp).len();
    ShiftStats::new(old_start, new_start, affected)
}

/// Statistics for [`shift_project`] without mutating anything.
pub fn compute_project_shift_stats(
    campaigns: &[Campaign],
    tasks: &[Task],
    project_id: Uuid,
    old_start: NaiveDate,
    new_start: NaiveDate,
    new_end: NaiveDate,
    clamp: bool,
) -> ShiftStats {
    let cascade = shift_project(campaigns, tasks, project_id, old_start, new_start, new_end, clamp);
    ShiftStats::new(old_start, new_start, cascade.affected_count())
}
