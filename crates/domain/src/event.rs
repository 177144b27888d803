//! Event — an immutable record of a schedule change.
//!
//! Events are pushed to live dashboards so that every operator sees
//! creations, edits, pauses and derived state transitions without polling.

use serde::{Deserialize, Serialize};

use crate::id::{ScheduleId, ZoneId};
use crate::schedule::{ScheduleEntry, ScheduleState};
use crate::time::Timestamp;

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    ScheduleCreated,
    ScheduleUpdated,
    ScheduleDeleted,
    SchedulePaused,
    ScheduleResumed,
    /// The derived state moved because the clock crossed a window bound.
    StateChanged,
}

impl EventType {
    /// Wire label, identical to the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ScheduleCreated => "schedule_created",
            Self::ScheduleUpdated => "schedule_updated",
            Self::ScheduleDeleted => "schedule_deleted",
            Self::SchedulePaused => "schedule_paused",
            Self::ScheduleResumed => "schedule_resumed",
            Self::StateChanged => "state_changed",
        }
    }
}

/// A change notification for one schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub event_type: EventType,
    pub zone_id: ZoneId,
    pub schedule_id: ScheduleId,
    /// Derived state at `timestamp`; absent for deletions.
    pub state: Option<ScheduleState>,
    pub timestamp: Timestamp,
}

impl Event {
    /// Build an event for `entry`, deriving its state at `timestamp`.
    #[must_use]
    pub fn for_entry(event_type: EventType, entry: &ScheduleEntry, timestamp: Timestamp) -> Self {
        Self {
            event_type,
            zone_id: entry.zone_id,
            schedule_id: entry.id,
            state: Some(entry.state_at(timestamp)),
            timestamp,
        }
    }

    #[must_use]
    pub fn deleted(entry: &ScheduleEntry, timestamp: Timestamp) -> Self {
        Self {
            event_type: EventType::ScheduleDeleted,
            zone_id: entry.zone_id,
            schedule_id: entry.id,
            state: None,
            timestamp,
        }
    }
}
