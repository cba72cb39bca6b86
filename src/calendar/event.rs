use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which entity a stage marker hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageOwner {
    Project(Uuid),
    Campaign(Uuid),
}

impl StageOwner {
    fn slug(&self) -> (&'static str, Uuid) {
        match self {
            StageOwner::Project(id) => ("project", *id),
            StageOwner::Campaign(id) => ("campaign", *id),
        }
    }
}

/// The planning record an event was derived from, with its back-references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventSource {
    Task {
        task_id: Uuid,
        campaign_id: Option<Uuid>,
    },
    Campaign {
        campaign_id: Uuid,
        project_id: Option<Uuid>,
    },
    Project {
        project_id: Uuid,
    },
    Stage {
        stage_id: Uuid,
        owner: StageOwner,
    },
}

/// Discriminant of [`EventSource`], for filtering and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Task,
    Campaign,
    Project,
    Stage,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Task => "Task",
            EventKind::Campaign => "Campaign",
            EventKind::Project => "Project",
            EventKind::Stage => "Stage",
        }
    }
}

impl EventSource {
    pub fn kind(&self) -> EventKind {
        match self {
            EventSource::Task { .. } => EventKind::Task,
            EventSource::Campaign { .. } => EventKind::Campaign,
            EventSource::Project { .. } => EventKind::Project,
            EventSource::Stage { .. } => EventKind::Stage,
        }
    }

    /// Deterministic event id, e.g. `task-<uuid>`.
    pub fn event_id(&self) -> String {
        match self {
            EventSource::Task { task_id, .. } => format!("task-{task_id}"),
            EventSource::Campaign { campaign_id, .. } => format!("campaign-{campaign_id}"),
            EventSource::Project { project_id } => format!("project-{project_id}"),
            EventSource::Stage { stage_id, owner } => {
                let (kind, owner_id) = owner.slug();
                format!("stage-{kind}-{owner_id}-{stage_id}")
            }
        }
    }
}

/// Semantic colors. Renderers map these onto their own palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventColor {
    Green,
    Blue,
    Purple,
    Orange,
    Teal,
}

impl EventColor {
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            EventColor::Green => [52, 168, 83],
            EventColor::Blue => [66, 133, 244],
            EventColor::Purple => [171, 71, 188],
            EventColor::Orange => [251, 140, 0],
            EventColor::Teal => [0, 172, 193],
        }
    }
}

/// One item on the calendar. Rebuilt from the workspace on every refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDate,
    /// Inclusive; equal to `start` for single-day events.
    pub end: NaiveDate,
    pub color: EventColor,
    pub source: EventSource,
    pub completed: bool,
    pub description: String,
}

impl CalendarEvent {
    /// Build an event, swapping the bounds if they arrive inverted.
    pub fn new(
        source: EventSource,
        title: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        color: EventColor,
    ) -> Self {
        Self {
            id: source.event_id(),
            title: title.into(),
            start: start.min(end),
            end: end.max(start),
            color,
            source,
            completed: false,
            description: String::new(),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.source.kind()
    }

    /// Inclusive length in days, minus one (zero for single-day events).
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Stage markers are single points in time and cannot be resized.
    pub fn is_resizable(&self) -> bool {
        !matches!(self.source, EventSource::Stage { .. })
    }
}
