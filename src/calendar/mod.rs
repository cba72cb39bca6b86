//! The calendar core: event normalization, week segmentation, layer layout,
//! drag interaction and date cascading.

pub mod cascade;
pub mod event;
pub mod interaction;
pub mod layout;
pub mod normalize;
pub mod schedule;
pub mod segment;
pub mod view_state;

pub use cascade::{
    compute_project_shift_stats, compute_shift_stats, shift_dependents, shift_project, Schedulable,
    ShiftDirection, ShiftStats,
};
pub use event::{CalendarEvent, EventColor, EventKind, EventSource, StageOwner};
pub use interaction::{
    schedule_drop, DateAtPosition, DateChangeIntent, DragSession, DropItem, EventTarget,
    GestureMode, IntentOrigin, InteractionController, PointerPos, ReleaseOutcome, ResizeHandle,
};
pub use layout::{layout_rows, layout_rows_bounded, BoundedRow, Layers};
pub use normalize::normalize;
pub use schedule::{apply_change, execute_plan, plan_change, ScheduleReport, SchedulePlan};
pub use segment::{segment, segment_all, EventSegment};
pub use view_state::{CalendarViewState, EventFilter};
