//! Whole-dataset sorting.

use std::cmp::Ordering;

use super::Direction;
use super::SortKey;
use super::SortModel;
use crate::model::Column;
use crate::model::ColumnType;
use crate::model::Row;
use crate::model::column_type_of;

/// Sorts rows by one field and returns the sorted copy.
///
/// An empty `field` returns the rows unchanged in their original order. A
/// missing `column_type` sorts as text. The sort is stable.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{ColumnType, Row};
/// use datagrid_lib::query::{sort_rows, Direction};
///
/// let rows = vec![Row::new().set("age", 30), Row::new().set("age", 25)];
/// let sorted = sort_rows(&rows, "age", Direction::Asc, Some(ColumnType::Number));
/// assert_eq!(sorted[0].get_int("age").unwrap(), Some(25));
/// ```
pub fn sort_rows(
    rows: &[Row],
    field: &str,
    direction: Direction,
    column_type: Option<ColumnType>,
) -> Vec<Row> {
    let refs: Vec<&Row> = rows.iter().collect();
    sort_refs(&refs, field, direction, column_type)
        .into_iter()
        .cloned()
        .collect()
}

/// Sorts borrowed rows by one field. See [`sort_rows`].
pub fn sort_refs<'a>(
    rows: &[&'a Row],
    field: &str,
    direction: Direction,
    column_type: Option<ColumnType>,
) -> Vec<&'a Row> {
    if field.is_empty() {
        return rows.to_vec();
    }
    sort_keyed(rows, &[(field, direction, column_type.unwrap_or_default())])
}

/// Sorts borrowed rows by every key of `model`, later keys breaking ties.
///
/// Column types are looked up in `columns`; undeclared fields sort as text.
pub fn sort_by_model<'a>(rows: &[&'a Row], model: &SortModel, columns: &[Column]) -> Vec<&'a Row> {
    let keys: Vec<(&str, Direction, ColumnType)> = model
        .specs()
        .iter()
        .filter(|spec| !spec.field.is_empty())
        .map(|spec| {
            (
                spec.field.as_str(),
                spec.direction,
                column_type_of(columns, &spec.field),
            )
        })
        .collect();

    if keys.is_empty() {
        return rows.to_vec();
    }
    sort_keyed(rows, &keys)
}

fn sort_keyed<'a>(rows: &[&'a Row], keys: &[(&str, Direction, ColumnType)]) -> Vec<&'a Row> {
    let mut decorated: Vec<(Vec<SortKey>, &'a Row)> = rows
        .iter()
        .map(|row| {
            let row_keys = keys
                .iter()
                .map(|(field, _, column_type)| SortKey::of(row.value(field), *column_type))
                .collect();
            (row_keys, *row)
        })
        .collect();

    // `sort_by` is stable, so rows with equal keys keep their input order.
    decorated.sort_by(|(a, _), (b, _)| {
        keys.iter()
            .zip(a.iter().zip(b.iter()))
            .map(|((_, direction, _), (a, b))| a.compare(b, *direction))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });

    log::trace!("sorted {} rows on {} key(s)", decorated.len(), keys.len());
    decorated.into_iter().map(|(_, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    fn people() -> Vec<Row> {
        vec![
            Row::new().set("name", "John").set("age", 30),
            Row::new().set("name", "alice").set("age", 25),
            Row::new().set("name", "Bob").set("age", 45),
            Row::new().set("name", "Zoe").set("age", 28),
        ]
    }

    fn names(rows: &[Row]) -> Vec<&str> {
        rows.iter()
            .map(|r| r.get_string("name").unwrap().unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_empty_field_passes_through() {
        let rows = people();
        assert_eq!(sort_rows(&rows, "", Direction::Asc, None), rows);
    }

    #[test]
    fn test_sort_strings_case_insensitive() {
        let sorted = sort_rows(&people(), "name", Direction::Asc, None);
        assert_eq!(names(&sorted), vec!["alice", "Bob", "John", "Zoe"]);
    }

    #[test]
    fn test_sort_numbers_desc() {
        let sorted = sort_rows(&people(), "age", Direction::Desc, Some(ColumnType::Number));
        assert_eq!(names(&sorted), vec!["Bob", "John", "Zoe", "alice"]);
    }

    #[test]
    fn test_null_pinned_to_ends() {
        let mut rows = people();
        rows.push(Row::new().set("name", "Nobody").set("age", Value::Null));

        let asc = sort_rows(&rows, "age", Direction::Asc, Some(ColumnType::Number));
        assert_eq!(names(&asc)[0], "Nobody");

        let desc = sort_rows(&rows, "age", Direction::Desc, Some(ColumnType::Number));
        assert_eq!(names(&desc)[4], "Nobody");
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let rows = vec![
            Row::new().set("name", "first").set("group", 1),
            Row::new().set("name", "second").set("group", 0),
            Row::new().set("name", "third").set("group", 1),
        ];
        let sorted = sort_rows(&rows, "group", Direction::Asc, Some(ColumnType::Number));
        assert_eq!(names(&sorted), vec!["second", "first", "third"]);
    }

    #[test]
    fn test_multi_key_falls_through_on_ties() {
        let rows = vec![
            Row::new().set("name", "b").set("age", 30),
            Row::new().set("name", "c").set("age", 25),
            Row::new().set("name", "a").set("age", 30),
        ];
        let columns = vec![
            Column::new("name", "Name"),
            Column::new("age", "Age").with_type(ColumnType::Number),
        ];
        let refs: Vec<&Row> = rows.iter().collect();
        let sorted = sort_by_model(&refs, &SortModel::desc("age").then_asc("name"), &columns);
        let sorted: Vec<Row> = sorted.into_iter().cloned().collect();
        assert_eq!(names(&sorted), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_input_not_mutated() {
        let rows = people();
        let before = rows.clone();
        let _ = sort_rows(&rows, "age", Direction::Asc, Some(ColumnType::Number));
        assert_eq!(rows, before);
    }
}
