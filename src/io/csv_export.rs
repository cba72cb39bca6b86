use crate::calendar::CalendarEvent;
use crate::error::FileError;
use std::path::Path;

/// Export calendar events to a semicolon-delimited CSV file.
///
/// Columns: Kind ; Title ; Start Date ; End Date ; Completed
/// Dates are formatted as DD/MM/YYYY.
/// Returns the number of events written.
pub fn export_events(events: &[CalendarEvent], path: &Path) -> Result<usize, FileError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)?;
    write_events(&mut wtr, events)?;
    wtr.flush().map_err(|source| FileError::Write {
        path: path.display().to_string(),
        source,
    })?;
    Ok(events.len())
}

fn write_events<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    events: &[CalendarEvent],
) -> Result<(), csv::Error> {
    wtr.write_record(["Kind", "Title", "Start Date", "End Date", "Completed"])?;
    for event in events {
        let start = event.start.format("%d/%m/%Y").to_string();
        let end = event.end.format("%d/%m/%Y").to_string();
        wtr.write_record([
            event.kind().label(),
            event.title.as_str(),
            start.as_str(),
            end.as_str(),
            if event.completed { "yes" } else { "no" },
        ])?;
    }
    Ok(())
}
