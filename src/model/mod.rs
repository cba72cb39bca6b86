pub mod campaign;
pub mod project;
pub mod stage;
pub mod task;
pub mod timeline;
pub mod workspace;

pub use campaign::Campaign;
pub use project::Project;
pub use stage::StageDate;
pub use task::Task;
pub use timeline::{CalendarView, CalendarWindow, ViewMode};
pub use workspace::Workspace;
