//! HTTP cache validation module
//!
//! Provides `Last-Modified` formatting and `If-Modified-Since` evaluation.

use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// Format a timestamp as an HTTP-date, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
pub fn format_http_date(time: SystemTime) -> String {
    let utc: DateTime<Utc> = time.into();
    utc.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse an HTTP-date (RFC 2822 style, `GMT` accepted)
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Check whether the client's copy is still fresh
///
/// `If-None-Match` takes precedence and disables the date check entirely.
/// Unparseable dates are ignored. Comparison is at second precision.
///
/// # Returns
/// Returns true if the response should be `304 Not Modified`
pub fn is_not_modified(
    if_modified_since: Option<&str>,
    has_if_none_match: bool,
    modified: SystemTime,
) -> bool {
    if has_if_none_match {
        return false;
    }
    let Some(since) = if_modified_since.and_then(parse_http_date) else {
        return false;
    };
    let modified: DateTime<Utc> = modified.into();
    modified.timestamp() <= since.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn rfc_example() -> SystemTime {
        // Sun, 06 Nov 1994 08:49:37 GMT
        UNIX_EPOCH + Duration::from_secs(784_111_777)
    }

    #[test]
    fn test_format_http_date() {
        assert_eq!(format_http_date(rfc_example()), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_parse_http_date() {
        let parsed = parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT").unwrap();
        assert_eq!(parsed.timestamp(), 784_111_777);
        assert!(parse_http_date("yesterday").is_none());
    }

    #[test]
    fn test_not_modified_same_second() {
        let modified = rfc_example() + Duration::from_millis(400);
        assert!(is_not_modified(
            Some("Sun, 06 Nov 1994 08:49:37 GMT"),
            false,
            modified
        ));
    }

    #[test]
    fn test_modified_after_date() {
        let modified = rfc_example() + Duration::from_secs(60);
        assert!(!is_not_modified(
            Some("Sun, 06 Nov 1994 08:49:37 GMT"),
            false,
            modified
        ));
    }

    #[test]
    fn test_if_none_match_disables_date_check() {
        assert!(!is_not_modified(
            Some("Sun, 06 Nov 1994 08:49:37 GMT"),
            true,
            rfc_example()
        ));
    }

    #[test]
    fn test_missing_or_invalid_header() {
        assert!(!is_not_modified(None, false, rfc_example()));
        assert!(!is_not_modified(Some("not a date"), false, rfc_example()));
    }
}
