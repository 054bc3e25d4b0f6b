//! Deadline normalization.
//!
//! Every accepted input becomes one UTC instant at ingestion, so comparisons
//! downstream are plain instant arithmetic.

use chrono::{DateTime, Days, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};

use super::TodoError;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses a user-supplied deadline.
///
/// - RFC 3339 with an offset is taken as-is.
/// - A date and time without offset is read as wall-clock time in `tz`.
/// - A bare date means the end of that day, stored as midnight at the start
///   of the following day in `tz`.
/// - Blank input means no deadline.
pub fn parse_deadline<Tz: TimeZone>(
    input: &str,
    tz: &Tz,
) -> Result<Option<DateTime<Utc>>, TodoError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let invalid = || TodoError::InvalidDeadline(input.to_string());

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return local_to_utc(tz, naive).map(Some).ok_or_else(invalid);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let midnight = date
            .checked_add_days(Days::new(1))
            .and_then(|next| next.and_hms_opt(0, 0, 0))
            .ok_or_else(invalid)?;
        return local_to_utc(tz, midnight).map(Some).ok_or_else(invalid);
    }

    Err(invalid())
}

/// Resolves wall-clock time in `tz`. Ambiguous times take the earlier
/// instant; times skipped by a DST change are rejected.
fn local_to_utc<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s)
            .expect("valid rfc3339")
            .with_timezone(&Utc)
    }

    fn plus_two() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).expect("valid offset")
    }

    #[test]
    fn blank_is_none() {
        assert_eq!(parse_deadline("", &Utc).expect("ok"), None);
        assert_eq!(parse_deadline("   ", &plus_two()).expect("ok"), None);
    }

    #[test]
    fn rfc3339_ignores_caller_zone() {
        let parsed = parse_deadline("2026-03-01T10:00:00+02:00", &Utc).expect("ok");
        assert_eq!(parsed, Some(utc("2026-03-01T08:00:00Z")));
    }

    #[test]
    fn naive_datetime_uses_caller_zone() {
        let parsed = parse_deadline("2026-03-01T10:00", &plus_two()).expect("ok");
        assert_eq!(parsed, Some(utc("2026-03-01T08:00:00Z")));
        let spaced = parse_deadline("2026-03-01 10:00:30", &plus_two()).expect("ok");
        assert_eq!(spaced, Some(utc("2026-03-01T08:00:30Z")));
    }

    #[test]
    fn same_instant_in_different_formats_compares_equal() {
        let a = parse_deadline("2026-03-01T08:00:00Z", &Utc).expect("ok");
        let b = parse_deadline("2026-03-01 10:00", &plus_two()).expect("ok");
        let c = parse_deadline("2026-03-01T10:00:00+02:00", &Utc).expect("ok");
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn date_only_means_end_of_day() {
        let parsed = parse_deadline("2026-03-01", &Utc).expect("ok");
        assert_eq!(parsed, Some(utc("2026-03-02T00:00:00Z")));
        let local = parse_deadline("2026-03-01", &plus_two()).expect("ok");
        assert_eq!(local, Some(utc("2026-03-01T22:00:00Z")));
    }

    #[test]
    fn garbage_is_rejected() {
        for input in ["tomorrow", "2026-13-01", "01/03/2026", "2026-03-01T25:00"] {
            match parse_deadline(input, &Utc) {
                Err(TodoError::InvalidDeadline(raw)) => assert_eq!(raw, input),
                other => panic!("expected InvalidDeadline for {input}, got {other:?}"),
            }
        }
    }
}
