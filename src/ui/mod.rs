pub mod calendar_grid;
pub mod dialogs;
pub mod theme;
pub mod toolbar;
pub mod unscheduled_panel;
