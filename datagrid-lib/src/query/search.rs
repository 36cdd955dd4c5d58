//! Global search across every field of a row.

use crate::model::DisplayFormat;
use crate::model::Row;
use crate::model::Value;

/// Returns the rows that contain `term` in any field, in input order.
///
/// Matching is case-insensitive substring search over each value's display
/// text. Dates are matched through their date text and their time text
/// separately, as rendered by `format`. Null values never match. An empty
/// term returns every row.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{DisplayFormat, Row};
/// use datagrid_lib::query::search_rows;
///
/// let rows = vec![
///     Row::new().set("name", "John").set("city", "Boston"),
///     Row::new().set("name", "Alice").set("city", "Paris"),
/// ];
/// let hits = search_rows(&rows, "BOS", &DisplayFormat::default());
/// assert_eq!(hits.len(), 1);
/// ```
pub fn search_rows(rows: &[Row], term: &str, format: &DisplayFormat) -> Vec<Row> {
    let refs: Vec<&Row> = rows.iter().collect();
    search_refs(&refs, term, format)
        .into_iter()
        .cloned()
        .collect()
}

/// Searches borrowed rows. See [`search_rows`].
pub fn search_refs<'a>(rows: &[&'a Row], term: &str, format: &DisplayFormat) -> Vec<&'a Row> {
    if term.is_empty() {
        return rows.to_vec();
    }

    let term = term.to_lowercase();
    rows.iter()
        .copied()
        .filter(|row| row_contains(row, &term, format))
        .collect()
}

/// Returns `true` if any field of `row` contains the lowercased `term`.
pub fn row_contains(row: &Row, term: &str, format: &DisplayFormat) -> bool {
    row.values().any(|value| match value {
        Value::Null => false,
        Value::DateTime(dt) => {
            format.date_text(dt).to_lowercase().contains(term)
                || format.time_text(dt).to_lowercase().contains(term)
        }
        other => other.to_text().to_lowercase().contains(term),
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    fn rows() -> Vec<Row> {
        vec![
            Row::new()
                .set("name", "John")
                .set("age", 30)
                .set("joined", Utc.with_ymd_and_hms(2023, 1, 15, 9, 30, 0).unwrap()),
            Row::new()
                .set("name", "Alice")
                .set("age", 25)
                .set("note", Value::Null),
        ]
    }

    #[test]
    fn test_empty_term_keeps_all() {
        assert_eq!(search_rows(&rows(), "", &DisplayFormat::default()).len(), 2);
    }

    #[test]
    fn test_matches_any_field() {
        let format = DisplayFormat::default();
        assert_eq!(search_rows(&rows(), "ALI", &format).len(), 1);
        assert_eq!(search_rows(&rows(), "25", &format).len(), 1);
        assert!(search_rows(&rows(), "zzz", &format).is_empty());
    }

    #[test]
    fn test_dates_match_date_or_time_text() {
        let format = DisplayFormat::default();
        assert_eq!(search_rows(&rows(), "1/15/2023", &format).len(), 1);
        assert_eq!(search_rows(&rows(), "9:30:00 am", &format).len(), 1);
        // Date and time are checked separately, never joined.
        assert!(search_rows(&rows(), "2023 9:30", &format).is_empty());
    }

    #[test]
    fn test_huge_numbers_match_exponent_text() {
        let rows = vec![Row::new().set("mass", 2e30), Row::new().set("mass", 1e-8)];
        let format = DisplayFormat::default();
        assert_eq!(search_rows(&rows, "e+30", &format).len(), 1);
        assert_eq!(search_rows(&rows, "1e-8", &format).len(), 1);
        assert!(search_rows(&rows, "000000000", &format).is_empty());
    }

    #[test]
    fn test_null_never_matches() {
        assert!(search_rows(&rows(), "null", &DisplayFormat::default()).is_empty());
    }
}
