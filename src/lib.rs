//! Calendar core of the campaign planner.
//!
//! Projects, campaigns, stages and tasks are normalized into
//! [`calendar::CalendarEvent`]s, split into week-row segments, stacked into
//! layers and manipulated through the drag [`calendar::InteractionController`].
//! Date changes are validated against the hierarchy and cascaded through the
//! [`store`] capabilities.

pub mod calendar;
pub mod error;
pub mod io;
pub mod model;
pub mod settings;
pub mod store;

pub use error::{FileError, InteractionError, ScheduleError, StoreError};
pub use settings::Settings;
