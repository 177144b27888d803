//! Half-open activation window.

use chrono::TimeDelta;
use serde::Serialize;

use super::ScheduleConflict;
use crate::time::Timestamp;

/// A validated `[start_at, end_at)` interval with `end_at > start_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    start_at: Timestamp,
    end_at: Timestamp,
}

impl TimeWindow {
    /// Build a window.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleConflict::EndBeforeStart`] unless `end_at` is
    /// strictly after `start_at`.
    pub fn new(start_at: Timestamp, end_at: Timestamp) -> Result<Self, ScheduleConflict> {
        if end_at <= start_at {
            return Err(ScheduleConflict::EndBeforeStart);
        }
        Ok(Self { start_at, end_at })
    }

    #[must_use]
    pub fn start_at(&self) -> Timestamp {
        self.start_at
    }

    #[must_use]
    pub fn end_at(&self) -> Timestamp {
        self.end_at
    }

    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end_at - self.start_at
    }

    /// Whether `[start_at, end_at)` shares any instant with this window.
    ///
    /// Touching endpoints do not count, so back-to-back windows are allowed.
    #[must_use]
    pub fn intersects(&self, start_at: Timestamp, end_at: Timestamp) -> bool {
        self.start_at < end_at && self.end_at > start_at
    }

    /// Whether `instant` falls inside the window.
    #[must_use]
    pub fn contains(&self, instant: Timestamp) -> bool {
        self.start_at <= instant && instant < self.end_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(hour: u32, minute: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 6, 1, hour, minute, 0).unwrap()
    }

    #[test]
    fn should_reject_empty_and_inverted_windows() {
        assert_eq!(
            TimeWindow::new(at(9, 0), at(9, 0)),
            Err(ScheduleConflict::EndBeforeStart)
        );
        assert_eq!(
            TimeWindow::new(at(10, 0), at(9, 0)),
            Err(ScheduleConflict::EndBeforeStart)
        );
    }

    #[test]
    fn should_not_intersect_when_touching() {
        let w = TimeWindow::new(at(9, 0), at(10, 0)).unwrap();
        assert!(!w.intersects(at(10, 0), at(11, 0)));
        assert!(!w.intersects(at(8, 0), at(9, 0)));
    }

    #[test]
    fn should_intersect_when_nested_or_straddling() {
        let w = TimeWindow::new(at(9, 0), at(10, 0)).unwrap();
        assert!(w.intersects(at(9, 30), at(9, 45)));
        assert!(w.intersects(at(8, 0), at(12, 0)));
        assert!(w.intersects(at(9, 59), at(10, 30)));
    }

    #[test]
    fn should_contain_start_but_not_end() {
        let w = TimeWindow::new(at(9, 0), at(10, 0)).unwrap();
        assert!(w.contains(at(9, 0)));
        assert!(!w.contains(at(10, 0)));
        assert_eq!(w.duration(), TimeDelta::hours(1));
    }
}
