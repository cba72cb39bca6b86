pub mod csv_export;
pub mod file;

pub use csv_export::export_events;
pub use file::{load_workspace, save_workspace};
