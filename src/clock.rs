//! Timestamp parsing and formatting.
//!
//! Upstream timestamps arrive as HTTP-dates in GMT; everything the service
//! reports is rendered in a fixed offset as `YYYY-MM-DD HH:mm:ss`.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// Display format for every timestamp in a report.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Build a fixed offset from whole hours east of UTC.
///
/// Returns `None` outside of -23..=23.
pub fn offset_from_hours(hours: i32) -> Option<FixedOffset> {
    if !(-23..=23).contains(&hours) {
        return None;
    }
    FixedOffset::east_opt(hours * 3600)
}

/// Render `time` in `offset` using [`DISPLAY_FORMAT`].
pub fn format_in_offset(time: DateTime<Utc>, offset: FixedOffset) -> String {
    time.with_timezone(&offset).format(DISPLAY_FORMAT).to_string()
}

/// Parse an HTTP `Last-Modified` value.
///
/// Accepts the IMF-fixdate form (`Sun, 06 Nov 1994 08:49:37 GMT`) as well as
/// the obsolete RFC 850 and asctime forms servers still occasionally emit.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc2822(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    // RFC 850: Sunday, 06-Nov-94 08:49:37 GMT
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%A, %d-%b-%y %H:%M:%S GMT") {
        return Some(Utc.from_utc_datetime(&naive));
    }

    // asctime: Sun Nov  6 08:49:37 1994
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDateTime::parse_from_str(&collapsed, "%a %b %d %H:%M:%S %Y")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_offset_bounds() {
        assert!(offset_from_hours(7).is_some());
        assert!(offset_from_hours(-12).is_some());
        assert!(offset_from_hours(24).is_none());
        assert!(offset_from_hours(-24).is_none());
    }

    #[test]
    fn test_format_shifts_to_utc_plus_seven() {
        let offset = offset_from_hours(7).unwrap();
        assert_eq!(
            format_in_offset(utc(2024, 3, 9, 20, 15, 42), offset),
            "2024-03-10 03:15:42"
        );
    }

    #[test]
    fn test_parse_imf_fixdate() {
        assert_eq!(
            parse_http_date("Wed, 21 Oct 2015 07:28:00 GMT"),
            Some(utc(2015, 10, 21, 7, 28, 0))
        );
    }

    #[test]
    fn test_parse_rfc850() {
        assert_eq!(
            parse_http_date("Sunday, 06-Nov-94 08:49:37 GMT"),
            Some(utc(1994, 11, 6, 8, 49, 37))
        );
    }

    #[test]
    fn test_parse_asctime() {
        assert_eq!(
            parse_http_date("Sun Nov  6 08:49:37 1994"),
            Some(utc(1994, 11, 6, 8, 49, 37))
        );
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_http_date("yesterday-ish"), None);
        assert_eq!(parse_http_date(""), None);
    }
}
