//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HortiTechError`] via `#[from]`.

use crate::schedule::{LifecycleError, ScheduleConflict};

/// Top-level error returned by domain operations, services and ports.
#[derive(Debug, thiserror::Error)]
pub enum HortiTechError {
    /// A record failed its own invariants.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A candidate schedule window was rejected.
    #[error("schedule rejected: {0}")]
    Conflict(#[from] ScheduleConflict),

    /// A manual action is not allowed in the schedule's current state.
    #[error("action refused: {0}")]
    Lifecycle(#[from] LifecycleError),

    /// The requested record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Invariant violations on a single record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("identifier is not a valid integer")]
    InvalidId,

    #[error("irrigation schedules require an irrigation type")]
    MissingIrrigationType,

    #[error("lighting schedules cannot carry an irrigation type")]
    UnexpectedIrrigationType,

    #[error("end must be strictly after start")]
    InvertedWindow,
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
