//! Candidate window validation against a zone's existing schedules.

use serde::Serialize;

use super::{ScheduleEntry, TimeWindow};
use crate::id::ScheduleId;
use crate::time::{Timestamp, parse_timestamp};

/// Why a candidate window was rejected.
///
/// Only the first failing check is ever reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ScheduleConflict {
    #[error("start or end is not a valid date")]
    InvalidDate,

    #[error("start is in the past")]
    StartInPast,

    #[error("end must be strictly after start")]
    EndBeforeStart,

    #[error("window overlaps schedule {with}")]
    Overlap { with: ScheduleId },
}

impl ScheduleConflict {
    /// Stable machine-readable code for API clients.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidDate => "invalid_date",
            Self::StartInPast => "start_in_past",
            Self::EndBeforeStart => "end_before_start",
            Self::Overlap { .. } => "overlap",
        }
    }
}

/// Checks a candidate window against a snapshot of existing entries.
///
/// The snapshot must hold only the entries of the zone and resource kind the
/// candidate belongs to. Validation is pure: the same inputs always yield the
/// same verdict.
#[derive(Debug, Clone, Copy)]
pub struct ConflictValidator<'a> {
    now: Timestamp,
    existing: &'a [ScheduleEntry],
    exclude: Option<ScheduleId>,
    original_start: Option<Timestamp>,
}

impl<'a> ConflictValidator<'a> {
    /// Validate a brand-new entry.
    #[must_use]
    pub fn new(now: Timestamp, existing: &'a [ScheduleEntry]) -> Self {
        Self {
            now,
            existing,
            exclude: None,
            original_start: None,
        }
    }

    /// Ignore the entry with `id` during the overlap scan.
    #[must_use]
    pub fn excluding(mut self, id: ScheduleId) -> Self {
        self.exclude = Some(id);
        self
    }

    /// Validate an edit of `entry`.
    ///
    /// The entry does not conflict with itself, and it may keep its original
    /// start even once that start lies in the past. Any other past start is
    /// still rejected.
    #[must_use]
    pub fn editing(self, entry: &ScheduleEntry) -> Self {
        let mut validator = self.excluding(entry.id);
        validator.original_start = Some(entry.start_at);
        validator
    }

    /// Parse and validate a candidate given as raw client strings.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleConflict::InvalidDate`] if either bound does not
    /// parse, otherwise whatever [`Self::validate_window`] returns.
    pub fn validate(&self, start: &str, end: &str) -> Result<TimeWindow, ScheduleConflict> {
        let (Some(start), Some(end)) = (parse_timestamp(start), parse_timestamp(end)) else {
            return Err(ScheduleConflict::InvalidDate);
        };
        self.validate_window(start, end)
    }

    /// Validate an already-parsed candidate.
    ///
    /// # Errors
    ///
    /// In order: [`ScheduleConflict::StartInPast`],
    /// [`ScheduleConflict::EndBeforeStart`], [`ScheduleConflict::Overlap`].
    pub fn validate_window(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<TimeWindow, ScheduleConflict> {
        if start < self.now && self.original_start != Some(start) {
            return Err(ScheduleConflict::StartInPast);
        }
        let window = TimeWindow::new(start, end)?;
        if let Some(other) = self
            .existing
            .iter()
            .filter(|e| Some(e.id) != self.exclude)
            .find(|e| e.overlaps(&window))
        {
            return Err(ScheduleConflict::Overlap { with: other.id });
        }
        Ok(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ZoneId;
    use crate::schedule::{IrrigationType, NewSchedule};
    use chrono::{TimeDelta, TimeZone, Utc};

    fn at(hour: u32, minute: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 6, 1, hour, minute, 0).unwrap()
    }

    fn entry(id: i64, start: Timestamp, end: Timestamp) -> ScheduleEntry {
        NewSchedule::irrigation(
            ZoneId::new(1),
            IrrigationType::Drip,
            TimeWindow::new(start, end).unwrap(),
        )
        .with_id(ScheduleId::new(id))
    }

    fn morning() -> Vec<ScheduleEntry> {
        vec![entry(1, at(9, 0), at(10, 0))]
    }

    #[test]
    fn should_reject_nested_candidate_with_overlap() {
        let existing = morning();
        let result = ConflictValidator::new(at(6, 0), &existing).validate_window(at(9, 30), at(9, 45));
        assert_eq!(
            result,
            Err(ScheduleConflict::Overlap {
                with: ScheduleId::new(1)
            })
        );
    }

    #[test]
    fn should_accept_back_to_back_candidates() {
        let existing = morning();
        let validator = ConflictValidator::new(at(6, 0), &existing);
        assert!(validator.validate_window(at(10, 0), at(11, 0)).is_ok());
        assert!(validator.validate_window(at(8, 0), at(9, 0)).is_ok());
    }

    #[test]
    fn should_reject_candidate_sharing_start() {
        let existing = morning();
        let result = ConflictValidator::new(at(6, 0), &existing).validate_window(at(9, 0), at(9, 5));
        assert!(matches!(result, Err(ScheduleConflict::Overlap { .. })));
    }

    #[test]
    fn should_report_invalid_date_before_anything_else() {
        let existing = morning();
        let validator = ConflictValidator::new(at(6, 0), &existing);
        assert_eq!(
            validator.validate("not a date", "2026-06-01T08:00:00Z"),
            Err(ScheduleConflict::InvalidDate)
        );
        assert_eq!(
            validator.validate("2026-06-01T08:00:00Z", ""),
            Err(ScheduleConflict::InvalidDate)
        );
    }

    #[test]
    fn should_report_past_start_before_inverted_window() {
        let validator = ConflictValidator::new(at(12, 0), &[]);
        assert_eq!(
            validator.validate_window(at(11, 0), at(10, 0)),
            Err(ScheduleConflict::StartInPast)
        );
    }

    #[test]
    fn should_accept_start_equal_to_now() {
        let validator = ConflictValidator::new(at(12, 0), &[]);
        assert!(validator.validate_window(at(12, 0), at(13, 0)).is_ok());
    }

    #[test]
    fn should_report_inverted_window_before_overlap() {
        let existing = morning();
        let result = ConflictValidator::new(at(6, 0), &existing).validate_window(at(9, 30), at(9, 30));
        assert_eq!(result, Err(ScheduleConflict::EndBeforeStart));
    }

    #[test]
    fn should_parse_raw_strings_and_return_window() {
        let validator = ConflictValidator::new(at(6, 0), &[]);
        let window = validator
            .validate("2026-06-01T07:00:00Z", "2026-06-01T07:30")
            .unwrap();
        assert_eq!(window.start_at(), at(7, 0));
        assert_eq!(window.duration(), TimeDelta::minutes(30));
    }

    #[test]
    fn should_not_conflict_with_itself_when_editing() {
        let existing = morning();
        let result = ConflictValidator::new(at(6, 0), &existing)
            .editing(&existing[0])
            .validate_window(at(9, 15), at(10, 15));
        assert!(result.is_ok());
    }

    #[test]
    fn should_still_conflict_with_others_when_editing() {
        let existing = vec![
            entry(1, at(9, 0), at(10, 0)),
            entry(2, at(11, 0), at(12, 0)),
        ];
        let result = ConflictValidator::new(at(6, 0), &existing)
            .editing(&existing[0])
            .validate_window(at(9, 0), at(11, 30));
        assert_eq!(
            result,
            Err(ScheduleConflict::Overlap {
                with: ScheduleId::new(2)
            })
        );
    }

    #[test]
    fn should_keep_original_past_start_when_editing_started_entry() {
        let existing = morning();
        let now = at(9, 30);
        let result = ConflictValidator::new(now, &existing)
            .editing(&existing[0])
            .validate_window(at(9, 0), at(10, 30));
        assert!(result.is_ok());
    }

    #[test]
    fn should_reject_other_past_start_when_editing_started_entry() {
        let existing = morning();
        let now = at(9, 30);
        let result = ConflictValidator::new(now, &existing)
            .editing(&existing[0])
            .validate_window(at(9, 10), at(10, 30));
        assert_eq!(result, Err(ScheduleConflict::StartInPast));
    }

    #[test]
    fn should_return_same_verdict_when_validated_twice() {
        let existing = morning();
        let validator = ConflictValidator::new(at(6, 0), &existing);
        let first = validator.validate("2026-06-01T09:30:00Z", "2026-06-01T09:45:00Z");
        let second = validator.validate("2026-06-01T09:30:00Z", "2026-06-01T09:45:00Z");
        assert_eq!(first, second);
    }

    #[test]
    fn should_serialize_reason_tag() {
        let json = serde_json::to_value(ScheduleConflict::Overlap {
            with: ScheduleId::new(3),
        })
        .unwrap();
        assert_eq!(json["reason"], "overlap");
        assert_eq!(json["with"], 3);
        assert_eq!(ScheduleConflict::StartInPast.reason(), "start_in_past");
    }
}
