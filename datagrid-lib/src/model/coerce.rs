//! Text parsing behind the value coercions

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Utc;

/// Naive date-time layouts accepted for date columns, interpreted as UTC.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts accepted for date columns, at midnight UTC.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Parses text the way numeric conversion reads it.
///
/// Surrounding whitespace is ignored and blank text is `0`. Accepts decimal
/// and exponent notation, `0x`/`0o`/`0b` integer prefixes and `Infinity`.
/// Everything else is `NaN`.
pub fn parse_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }

    // Rust also accepts "inf" and "nan" spellings; numeric conversion does not.
    if text.bytes().any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E')) {
        return f64::NAN;
    }

    text.parse::<f64>().unwrap_or(f64::NAN)
}

/// Parses text into a date-time instant.
///
/// Tries RFC 3339 first, then the naive layouts in [`DATETIME_FORMATS`] and
/// [`DATE_FORMATS`], all read as UTC.
pub fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("30"), 30.0);
        assert_eq!(parse_number("  -2.5 "), -2.5);
        assert_eq!(parse_number("1e3"), 1000.0);
        assert_eq!(parse_number("0x10"), 16.0);
        assert_eq!(parse_number("   "), 0.0);
        assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("12abc").is_nan());
        assert!(parse_number("NaN").is_nan());
    }

    #[test]
    fn test_parse_instant_layouts() {
        let expected = Utc.with_ymd_and_hms(2023, 3, 5, 0, 0, 0).unwrap();
        assert_eq!(parse_instant("2023-03-05"), Some(expected));
        assert_eq!(parse_instant("03/05/2023"), Some(expected));
        assert_eq!(parse_instant("2023-03-05T00:00:00Z"), Some(expected));
        assert_eq!(parse_instant("2023-03-05 00:00:00"), Some(expected));
    }

    #[test]
    fn test_parse_instant_offset() {
        let expected = Utc.with_ymd_and_hms(2023, 3, 5, 10, 0, 0).unwrap();
        assert_eq!(parse_instant("2023-03-05T12:00:00+02:00"), Some(expected));
    }

    #[test]
    fn test_parse_instant_invalid() {
        assert_eq!(parse_instant(""), None);
        assert_eq!(parse_instant("yesterday"), None);
        assert_eq!(parse_instant("2023-13-45"), None);
    }
}
