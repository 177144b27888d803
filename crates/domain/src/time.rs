//! Time and timestamp helpers.

use chrono::{DateTime, NaiveDateTime, Utc};

/// UTC timestamp used for schedule windows and event times.
pub type Timestamp = DateTime<Utc>;

/// Offset-less formats accepted from HTML `datetime-local` inputs.
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Parse a timestamp supplied by a client.
///
/// Accepts RFC 3339 with any offset, then falls back to the offset-less
/// `YYYY-MM-DDTHH:MM[:SS]` form, which is read as UTC. Returns `None` for
/// anything else.
#[must_use]
pub fn parse_timestamp(input: &str) -> Option<Timestamp> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.to_utc());
    }
    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_normalize_rfc3339_offset_to_utc() {
        let ts = parse_timestamp("2026-05-01T09:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 5, 1, 7, 0, 0).unwrap());
    }

    #[test]
    fn should_read_datetime_local_as_utc() {
        let ts = parse_timestamp("2026-05-01T09:30").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 5, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn should_return_none_when_input_is_garbage() {
        assert!(parse_timestamp("tomorrow morning").is_none());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("2026-13-40T25:00").is_none());
    }
}
