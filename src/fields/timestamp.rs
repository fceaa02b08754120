//! Culture-invariant build timestamp parsing, normalized to UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Date-time layouts tried in order. Values without an offset are taken as UTC.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y%m%d%H%M%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    // C preprocessor __DATE__ " " __TIME__, e.g. "Dec  1 2012 13:05:09"
    "%b %e %Y %H:%M:%S",
];

/// Date-only layouts, taken as midnight UTC.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%b %e %Y"];

/// Parse a build timestamp. Unparsable text is `None`.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(dt.and_utc());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn compact_digits() {
        assert_eq!(
            parse_timestamp("20121201000000"),
            Some(Utc.with_ymd_and_hms(2012, 12, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn offset_is_normalized_to_utc() {
        assert_eq!(
            parse_timestamp("2016-03-05T10:00:00+02:00"),
            Some(Utc.with_ymd_and_hms(2016, 3, 5, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn c_date_and_time_macros() {
        assert_eq!(
            parse_timestamp("Dec  1 2012 13:05:09"),
            Some(Utc.with_ymd_and_hms(2012, 12, 1, 13, 5, 9).unwrap())
        );
        assert_eq!(
            parse_timestamp("Jan 15 2014"),
            Some(Utc.with_ymd_and_hms(2014, 1, 15, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn invariant_us_order() {
        assert_eq!(
            parse_timestamp("12/01/2012 00:00:00"),
            Some(Utc.with_ymd_and_hms(2012, 12, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn rejects_nonsense() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("20121341000000"), None);
    }
}
