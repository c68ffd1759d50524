//! Date/time utilities for stash.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC 3339 with millisecond precision.
///
/// Output looks like `2024-01-15T10:30:00.000Z`, the shape browsers
/// produce for `Date.toISOString()`.
pub fn to_rfc3339(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time formatted with [`to_rfc3339`].
pub fn now_rfc3339() -> String {
    to_rfc3339(&Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_to_rfc3339_whole_seconds() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(to_rfc3339(&dt), "2024-01-15T10:30:00.000Z");
    }

    #[test]
    fn test_to_rfc3339_truncates_to_millis() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        assert_eq!(to_rfc3339(&dt), "2024-01-15T10:30:00.123Z");
    }

    #[test]
    fn test_now_rfc3339_parses_back() {
        let s = now_rfc3339();
        assert!(s.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&s).is_ok());
    }
}
