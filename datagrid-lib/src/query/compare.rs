//! Type-aware ordering of cell values.

use std::cmp::Ordering;

use super::Direction;
use crate::model::ColumnType;
use crate::model::Value;

/// A cell value coerced for ordering under its column type.
///
/// Computing the key once per row keeps a sort from re-coercing (and
/// re-lowercasing) values on every comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    /// Null or missing value.
    Null,
    /// Number, or a date as epoch milliseconds. May be `NaN`.
    Number(f64),
    /// Boolean.
    Bool(bool),
    /// Lowercased text.
    Text(String),
}

impl SortKey {
    /// Coerces a value for ordering under `column_type`.
    pub fn of(value: &Value, column_type: ColumnType) -> Self {
        if value.is_null() {
            return SortKey::Null;
        }
        match column_type {
            ColumnType::Number => SortKey::Number(value.to_number()),
            ColumnType::Date => SortKey::Number(value.to_instant()),
            ColumnType::Boolean => SortKey::Bool(value.to_bool()),
            ColumnType::String => SortKey::Text(value.to_text().to_lowercase()),
        }
    }

    /// Orders two keys in `direction`.
    ///
    /// Nulls are pinned before everything when ascending and after everything
    /// when descending. `NaN` equals `NaN` and sorts above every real number.
    pub fn compare(&self, other: &Self, direction: Direction) -> Ordering {
        direction.apply(self.ascending(other))
    }

    fn ascending(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Null, SortKey::Null) => Ordering::Equal,
            (SortKey::Null, _) => Ordering::Less,
            (_, SortKey::Null) => Ordering::Greater,
            (SortKey::Number(a), SortKey::Number(b)) => compare_numbers(*a, *b),
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            // Keys of one column share a variant; rank mixed keys by variant.
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Null => 0,
            SortKey::Bool(_) => 1,
            SortKey::Number(_) => 2,
            SortKey::Text(_) => 3,
        }
    }
}

fn compare_numbers(a: f64, b: f64) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ordering) => ordering,
        None => match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            _ => Ordering::Less,
        },
    }
}

/// Orders two cell values of a column of type `column_type`.
///
/// Nulls sort first when ascending and last when descending, before any type
/// logic runs. Otherwise both values are coerced (numbers, date instants,
/// booleans, or lowercased text) and compared.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use datagrid_lib::model::{ColumnType, Value};
/// use datagrid_lib::query::{compare_values, Direction};
///
/// let ord = compare_values(&Value::from("10"), &Value::from(9), Direction::Asc, ColumnType::Number);
/// assert_eq!(ord, Ordering::Greater);
/// ```
pub fn compare_values(a: &Value, b: &Value, direction: Direction, column_type: ColumnType) -> Ordering {
    SortKey::of(a, column_type).compare(&SortKey::of(b, column_type), direction)
}
