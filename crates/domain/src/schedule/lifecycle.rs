//! Lifecycle state derivation, pause/resume and edit eligibility.
//!
//! ```text
//! Pending --(now >= start)--> InProgress --(now >= end)--> Finished
//! InProgress --(pause)--> Paused --(resume)--> InProgress
//! Paused --(now >= end)--> Finished
//! ```
//!
//! The state is never stored: it is recomputed from the clock on every call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ScheduleEntry, UnknownVariant};
use crate::id::ScheduleId;
use crate::time::Timestamp;

/// Display state of a schedule at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleState {
    Pending,
    InProgress,
    Paused,
    Finished,
}

impl ScheduleState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Paused => "paused",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for ScheduleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleState {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "paused" => Ok(Self::Paused),
            "finished" => Ok(Self::Finished),
            other => Err(UnknownVariant {
                kind: "schedule state",
                value: other.to_string(),
            }),
        }
    }
}

/// Derive the state from raw inputs. First match wins: an elapsed window is
/// `Finished` even when paused.
#[must_use]
pub fn derive_state(
    now: Timestamp,
    start_at: Timestamp,
    end_at: Timestamp,
    paused: bool,
) -> ScheduleState {
    if now >= end_at {
        ScheduleState::Finished
    } else if paused {
        ScheduleState::Paused
    } else if now >= start_at {
        ScheduleState::InProgress
    } else {
        ScheduleState::Pending
    }
}

/// A manual action refused because of the schedule's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("schedule {id} is {state} and cannot be paused or resumed")]
    NotToggleable { id: ScheduleId, state: ScheduleState },

    #[error("schedule {id} is running; pause it before editing or deleting")]
    NotModifiable { id: ScheduleId },
}

impl ScheduleEntry {
    #[must_use]
    pub fn state_at(&self, now: Timestamp) -> ScheduleState {
        derive_state(now, self.start_at, self.end_at, self.paused)
    }

    /// Pause and resume are only possible inside the window.
    #[must_use]
    pub fn can_toggle(&self, now: Timestamp) -> bool {
        self.start_at <= now && now < self.end_at
    }

    /// Edit and delete are refused only while the entry is actively running.
    #[must_use]
    pub fn can_modify(&self, now: Timestamp) -> bool {
        now < self.start_at || self.paused || now >= self.end_at
    }

    /// Flip the pause flag and return its new value.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NotToggleable`] outside the window.
    pub fn toggle_pause(&mut self, now: Timestamp) -> Result<bool, LifecycleError> {
        if !self.can_toggle(now) {
            return Err(LifecycleError::NotToggleable {
                id: self.id,
                state: self.state_at(now),
            });
        }
        self.paused = !self.paused;
        Ok(self.paused)
    }

    /// # Errors
    ///
    /// Returns [`LifecycleError::NotModifiable`] while the entry is running.
    pub fn ensure_modifiable(&self, now: Timestamp) -> Result<(), LifecycleError> {
        if self.can_modify(now) {
            Ok(())
        } else {
            Err(LifecycleError::NotModifiable { id: self.id })
        }
    }

    /// Everything a dashboard row needs, derived at `now`.
    #[must_use]
    pub fn snapshot(&self, now: Timestamp) -> ScheduleSnapshot {
        ScheduleSnapshot {
            state: self.state_at(now),
            can_toggle: self.can_toggle(now),
            can_modify: self.can_modify(now),
            entry: self.clone(),
        }
    }
}

/// A schedule plus its derived state and allowed actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    #[serde(flatten)]
    pub entry: ScheduleEntry,
    pub state: ScheduleState,
    pub can_toggle: bool,
    pub can_modify: bool,
}
