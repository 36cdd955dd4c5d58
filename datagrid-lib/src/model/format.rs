//! Display formatting for dates

use std::fmt::Write;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// How date values are rendered as text.
///
/// Used by the global search (which matches a date through its date text and
/// its time text separately) and by cell display. The defaults mirror a US
/// locale: `1/15/2023` and `10:30:00 AM`.
///
/// Formats use `chrono` strftime syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayFormat {
    /// Format for the date part.
    pub date: String,
    /// Format for the time part.
    pub time: String,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            date: "%-m/%-d/%Y".to_string(),
            time: "%-I:%M:%S %p".to_string(),
        }
    }
}

impl DisplayFormat {
    /// Creates a display format with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the date format.
    pub fn with_date(mut self, format: impl Into<String>) -> Self {
        self.date = format.into();
        self
    }

    /// Sets the time format.
    pub fn with_time(mut self, format: impl Into<String>) -> Self {
        self.time = format.into();
        self
    }

    /// Renders the date part of an instant.
    pub fn date_text(&self, dt: &DateTime<Utc>) -> String {
        render(dt, &self.date)
    }

    /// Renders the time part of an instant.
    pub fn time_text(&self, dt: &DateTime<Utc>) -> String {
        render(dt, &self.time)
    }
}

// A malformed format string makes chrono's Display fail; fall back to RFC 3339.
fn render(dt: &DateTime<Utc>, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", dt.format(format)).is_err() {
        log::warn!("invalid date format '{}', using RFC 3339", format);
        return dt.to_rfc3339();
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_default_format() {
        let dt = Utc.with_ymd_and_hms(2023, 1, 5, 14, 7, 9).unwrap();
        let format = DisplayFormat::default();
        assert_eq!(format.date_text(&dt), "1/5/2023");
        assert_eq!(format.time_text(&dt), "2:07:09 PM");
    }

    #[test]
    fn test_custom_format() {
        let dt = Utc.with_ymd_and_hms(2023, 1, 5, 14, 7, 9).unwrap();
        let format = DisplayFormat::new().with_date("%Y-%m-%d").with_time("%H:%M");
        assert_eq!(format.date_text(&dt), "2023-01-05");
        assert_eq!(format.time_text(&dt), "14:07");
    }
}
