//! Drag-move and drag-resize gestures on the calendar grid.
//!
//! One [`InteractionController`] serves every grid variant. It owns at most
//! one [`DragSession`]; starting a gesture while another is live is refused.
//! Pointer positions are mapped to dates through an injected
//! [`DateAtPosition`] so the controller knows nothing about rendering.

use chrono::NaiveDate;
use uuid::Uuid;

use super::event::{CalendarEvent, EventSource, StageOwner};
use crate::error::InteractionError;

/// Pointer travel (in surface units) before a press becomes a move.
pub const DEFAULT_DRAG_THRESHOLD: f32 = 5.0;

/// A pointer position on the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPos {
    pub x: f32,
    pub y: f32,
}

impl PointerPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: PointerPos) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Hit-testing capability supplied by the renderer.
pub trait DateAtPosition {
    /// The date of the calendar cell under `(x, y)`, if any.
    fn resolve_date_at(&self, x: f32, y: f32) -> Option<NaiveDate>;
}

impl<F> DateAtPosition for F
where
    F: Fn(f32, f32) -> Option<NaiveDate>,
{
    fn resolve_date_at(&self, x: f32, y: f32) -> Option<NaiveDate> {
        self(x, y)
    }
}

/// The record a date change applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Task(Uuid),
    Campaign(Uuid),
    Project(Uuid),
    Stage { owner: StageOwner, stage_id: Uuid },
}

impl From<&EventSource> for EventTarget {
    fn from(source: &EventSource) -> Self {
        match *source {
            EventSource::Task { task_id, .. } => EventTarget::Task(task_id),
            EventSource::Campaign { campaign_id, .. } => EventTarget::Campaign(campaign_id),
            EventSource::Project { project_id } => EventTarget::Project(project_id),
            EventSource::Stage { stage_id, owner } => EventTarget::Stage { owner, stage_id },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    Idle,
    Moving,
    Resizing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    Start,
    End,
    None,
}

/// State of the gesture in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub event_id: String,
    pub target: EventTarget,
    pub mode: GestureMode,
    pub resize_handle: ResizeHandle,
    pub live_start: NaiveDate,
    pub live_end: NaiveDate,
    pub original_start: NaiveDate,
    pub original_end: NaiveDate,
    /// Cell currently under the pointer; `None` when off the grid.
    pub live_over_date: Option<NaiveDate>,
}

impl DragSession {
    fn new(event: &CalendarEvent, mode: GestureMode, resize_handle: ResizeHandle) -> Self {
        Self {
            event_id: event.id.clone(),
            target: EventTarget::from(&event.source),
            mode,
            resize_handle,
            live_start: event.start,
            live_end: event.end,
            original_start: event.start,
            original_end: event.end,
            live_over_date: None,
        }
    }

    fn duration(&self) -> chrono::Duration {
        self.original_end - self.original_start
    }
}

/// How an intent came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOrigin {
    Move,
    Resize,
    Schedule,
}

/// A requested new date range for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateChangeIntent {
    pub target: EventTarget,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub origin: IntentOrigin,
}

/// An item dragged in from outside the grid, e.g. the unscheduled list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropItem {
    pub target: EventTarget,
    pub title: String,
}

/// Schedule a dropped item for one day starting at `date`.
///
/// Drops never touch the drag session.
pub fn schedule_drop(item: &DropItem, date: NaiveDate) -> DateChangeIntent {
    tracing::debug!(item = %item.title, %date, "scheduling dropped item");
    DateChangeIntent {
        target: item.target,
        start: date,
        end: date + chrono::Duration::days(1),
        origin: IntentOrigin::Schedule,
    }
}

/// What a pointer release amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Nothing was pressed.
    Idle,
    /// The press never travelled far enough to become a drag.
    Click { event_id: String },
    Committed(DateChangeIntent),
    /// A gesture ended without a usable target date or without a change.
    Cancelled,
}

#[derive(Debug, Clone)]
struct PendingPress {
    event: CalendarEvent,
    origin: PointerPos,
}

/// Drives the move and resize gestures.
#[derive(Debug, Clone)]
pub struct InteractionController {
    session: Option<DragSession>,
    pending: Option<PendingPress>,
    drag_threshold: f32,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl InteractionController {
    pub fn new(drag_threshold: f32) -> Self {
        Self {
            session: None,
            pending: None,
            drag_threshold: drag_threshold.max(0.0),
        }
    }

    pub fn mode(&self) -> GestureMode {
        self.session.as_ref().map_or(GestureMode::Idle, |s| s.mode)
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// True while a press is armed or a gesture is live.
    pub fn is_busy(&self) -> bool {
        self.session.is_some() || self.pending.is_some()
    }

    /// Live range to draw for `event_id` while it is being dragged.
    pub fn preview_for(&self, event_id: &str) -> Option<(NaiveDate, NaiveDate)> {
        self.session
            .as_ref()
            .filter(|s| s.event_id == event_id)
            .map(|s| (s.live_start, s.live_end))
    }

    pub fn begin_move(&mut self, event: &CalendarEvent) -> Result<(), InteractionError> {
        self.ensure_idle()?;
        tracing::debug!(event = %event.id, "move started");
        self.session = Some(DragSession::new(event, GestureMode::Moving, ResizeHandle::None));
        Ok(())
    }

    pub fn begin_resize(
        &mut self,
        event: &CalendarEvent,
        handle: ResizeHandle,
    ) -> Result<(), InteractionError> {
        self.ensure_idle()?;
        if handle == ResizeHandle::None || !event.is_resizable() {
            return Err(InteractionError::NotResizable(event.title.clone()));
        }
        tracing::debug!(event = %event.id, ?handle, "resize started");
        self.session = Some(DragSession::new(event, GestureMode::Resizing, handle));
        Ok(())
    }

    /// Record the date under the pointer and recompute the live range.
    pub fn update_hover(&mut self, date: Option<NaiveDate>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.live_over_date = date;
        let Some(date) = date else {
            return;
        };
        match (session.mode, session.resize_handle) {
            (GestureMode::Moving, _) => {
                session.live_start = date;
                session.live_end = date + session.duration();
            }
            (GestureMode::Resizing, ResizeHandle::Start) => {
                session.live_start = date.min(session.live_end);
            }
            (GestureMode::Resizing, ResizeHandle::End) => {
                session.live_end = date.max(session.live_start);
            }
            (GestureMode::Resizing, ResizeHandle::None) | (GestureMode::Idle, _) => {}
        }
    }

    /// End the gesture, returning the intent to apply if there is one.
    ///
    /// The controller is idle afterwards whatever the outcome.
    pub fn commit(&mut self) -> Option<DateChangeIntent> {
        self.pending = None;
        let session = self.session.take()?;
        let Some(over) = session.live_over_date else {
            tracing::debug!(event = %session.event_id, "released off the grid, nothing to commit");
            return None;
        };
        let (start, end, origin) = match session.mode {
            GestureMode::Moving => (over, over + session.duration(), IntentOrigin::Move),
            GestureMode::Resizing => (session.live_start, session.live_end, IntentOrigin::Resize),
            GestureMode::Idle => return None,
        };
        if start == session.original_start && end == session.original_end {
            tracing::debug!(event = %session.event_id, "dropped on its original dates");
            return None;
        }
        tracing::debug!(event = %session.event_id, %start, %end, ?origin, "gesture committed");
        Some(DateChangeIntent {
            target: session.target,
            start,
            end,
            origin,
        })
    }

    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!(event = %session.event_id, "gesture cancelled");
        }
        self.pending = None;
    }

    // ── Pointer protocol ──────────────────────────────────────────

    /// Pointer pressed on an event body. Becomes a move once it travels.
    pub fn press(&mut self, event: &CalendarEvent, at: PointerPos) -> Result<(), InteractionError> {
        self.ensure_idle()?;
        self.pending = Some(PendingPress {
            event: event.clone(),
            origin: at,
        });
        Ok(())
    }

    /// Pointer pressed on a resize handle. Resizing starts immediately.
    pub fn press_handle(
        &mut self,
        event: &CalendarEvent,
        handle: ResizeHandle,
    ) -> Result<(), InteractionError> {
        self.begin_resize(event, handle)
    }

    /// Track pointer motion; promotes an armed press to a move past the threshold.
    pub fn pointer_moved(&mut self, at: PointerPos, surface: &impl DateAtPosition) {
        if let Some(pending) = &self.pending {
            if pending.origin.distance(at) <= self.drag_threshold {
                return;
            }
            if let Some(pending) = self.pending.take() {
                tracing::debug!(event = %pending.event.id, "move started");
                self.session = Some(DragSession::new(
                    &pending.event,
                    GestureMode::Moving,
                    ResizeHandle::None,
                ));
            }
        }
        if self.session.is_some() {
            self.update_hover(surface.resolve_date_at(at.x, at.y));
        }
    }

    /// Pointer released: a click, a commit, or a cancel.
    pub fn release(&mut self) -> ReleaseOutcome {
        if let Some(pending) = self.pending.take() {
            return ReleaseOutcome::Click {
                event_id: pending.event.id,
            };
        }
        if self.session.is_none() {
            return ReleaseOutcome::Idle;
        }
        match self.commit() {
            Some(intent) => ReleaseOutcome::Committed(intent),
            None => ReleaseOutcome::Cancelled,
        }
    }

    fn ensure_idle(&self) -> Result<(), InteractionError> {
        if self.is_busy() {
            return Err(InteractionError::GestureInProgress);
        }
        Ok(())
    }
}
