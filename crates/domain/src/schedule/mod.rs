//! Schedule — a time-bounded activation window for a zone's irrigation or
//! lighting.
//!
//! A [`ScheduleEntry`] is validated against the other entries of the same
//! zone and resource by the [`ConflictValidator`] before it is stored, and its
//! display state ([`ScheduleState`]) is always derived from the clock rather
//! than persisted.

mod conflict;
mod lifecycle;
mod window;

pub use conflict::{ConflictValidator, ScheduleConflict};
pub use lifecycle::{LifecycleError, ScheduleSnapshot, ScheduleState, derive_state};
pub use window::TimeWindow;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HortiTechError, ValidationError};
use crate::id::{ScheduleId, ZoneId};
use crate::time::Timestamp;

/// The hardware a schedule drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Irrigation,
    Lighting,
}

impl ResourceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Irrigation => "irrigation",
            Self::Lighting => "lighting",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown enum label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for ResourceKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "irrigation" => Ok(Self::Irrigation),
            "lighting" => Ok(Self::Lighting),
            other => Err(UnknownVariant {
                kind: "resource kind",
                value: other.to_string(),
            }),
        }
    }
}

/// How an irrigation schedule delivers water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationType {
    Drip,
    Sprinkler,
    Manual,
}

impl IrrigationType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Drip => "drip",
            Self::Sprinkler => "sprinkler",
            Self::Manual => "manual",
        }
    }
}

impl FromStr for IrrigationType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drip" => Ok(Self::Drip),
            "sprinkler" => Ok(Self::Sprinkler),
            "manual" => Ok(Self::Manual),
            other => Err(UnknownVariant {
                kind: "irrigation type",
                value: other.to_string(),
            }),
        }
    }
}

/// A persisted activation window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: ScheduleId,
    pub zone_id: ZoneId,
    pub resource: ResourceKind,
    pub irrigation_type: Option<IrrigationType>,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub description: String,
    pub paused: bool,
}

impl ScheduleEntry {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HortiTechError::Validation`] when:
    /// - `end_at` does not follow `start_at` ([`ValidationError::InvertedWindow`])
    /// - the irrigation type does not match the resource kind
    pub fn validate(&self) -> Result<(), HortiTechError> {
        if self.end_at <= self.start_at {
            return Err(ValidationError::InvertedWindow.into());
        }
        check_irrigation_type(self.resource, self.irrigation_type)
    }

    /// Whether this entry's window intersects `window` (half-open).
    #[must_use]
    pub fn overlaps(&self, window: &TimeWindow) -> bool {
        window.intersects(self.start_at, self.end_at)
    }

    /// Replace the window, keeping every other field.
    pub fn reschedule(&mut self, window: TimeWindow) {
        self.start_at = window.start_at();
        self.end_at = window.end_at();
    }
}

/// A schedule that has not been persisted yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchedule {
    pub zone_id: ZoneId,
    pub resource: ResourceKind,
    pub irrigation_type: Option<IrrigationType>,
    pub window: TimeWindow,
    pub description: String,
}

impl NewSchedule {
    /// Create a schedule for either resource kind.
    ///
    /// # Errors
    ///
    /// Returns [`HortiTechError::Validation`] if `irrigation_type` is missing
    /// for irrigation or present for lighting.
    pub fn new(
        zone_id: ZoneId,
        resource: ResourceKind,
        irrigation_type: Option<IrrigationType>,
        window: TimeWindow,
    ) -> Result<Self, HortiTechError> {
        check_irrigation_type(resource, irrigation_type)?;
        Ok(Self {
            zone_id,
            resource,
            irrigation_type,
            window,
            description: String::new(),
        })
    }

    /// Shorthand for an irrigation schedule.
    #[must_use]
    pub fn irrigation(zone_id: ZoneId, irrigation_type: IrrigationType, window: TimeWindow) -> Self {
        Self {
            zone_id,
            resource: ResourceKind::Irrigation,
            irrigation_type: Some(irrigation_type),
            window,
            description: String::new(),
        }
    }

    /// Shorthand for a lighting schedule.
    #[must_use]
    pub fn lighting(zone_id: ZoneId, window: TimeWindow) -> Self {
        Self {
            zone_id,
            resource: ResourceKind::Lighting,
            irrigation_type: None,
            window,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach the identifier assigned by storage. New schedules start active.
    #[must_use]
    pub fn with_id(self, id: ScheduleId) -> ScheduleEntry {
        ScheduleEntry {
            id,
            zone_id: self.zone_id,
            resource: self.resource,
            irrigation_type: self.irrigation_type,
            start_at: self.window.start_at(),
            end_at: self.window.end_at(),
            description: self.description,
            paused: false,
        }
    }
}

fn check_irrigation_type(
    resource: ResourceKind,
    irrigation_type: Option<IrrigationType>,
) -> Result<(), HortiTechError> {
    match (resource, irrigation_type) {
        (ResourceKind::Irrigation, None) => Err(ValidationError::MissingIrrigationType.into()),
        (ResourceKind::Lighting, Some(_)) => Err(ValidationError::UnexpectedIrrigationType.into()),
        _ => Ok(()),
    }
}
