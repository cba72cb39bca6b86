//! Error types shared across the planner core.

use chrono::NaiveDate;
use uuid::Uuid;

/// Failures reported by the persistence collaborators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },
    #[error("update rejected: {0}")]
    Rejected(String),
}

/// Why a date change could not be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// The new range would place a child outside its container.
    #[error("'{child}' must stay within '{container}' ({start} – {end})")]
    ContainmentViolation {
        child: String,
        container: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    /// The container has no dates, so nothing can be placed inside it.
    #[error("'{container}' has no start and end dates yet")]
    ContainerUnscheduled { container: String },
    /// The entity links to a parent that does not exist.
    #[error("{kind} {id} referenced by '{child}' does not exist")]
    MissingParent {
        kind: &'static str,
        id: Uuid,
        child: String,
    },
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },
    #[error("failed to save '{entity}': {source}")]
    Persistence {
        entity: String,
        #[source]
        source: StoreError,
    },
}

/// Rejected gesture transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InteractionError {
    #[error("another drag gesture is already in progress")]
    GestureInProgress,
    #[error("'{0}' cannot be resized")]
    NotResizable(String),
}

/// Errors from reading and writing workspace files.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid workspace file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}
