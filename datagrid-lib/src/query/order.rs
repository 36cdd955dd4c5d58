//! Ordering types for sorting rows.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Orients an ascending ordering to this direction.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => f.write_str("asc"),
            Direction::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Direction::Asc),
            "desc" | "descending" => Ok(Direction::Desc),
            other => Err(ConfigError::Parse(format!("unknown sort direction '{}'", other))),
        }
    }
}

/// One sort key: a field and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: Direction,
}

impl SortSpec {
    /// Creates a sort spec.
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// Specifies the ordering of rows.
///
/// Usually a single field. Further fields break ties of the ones before them.
/// An empty model leaves rows in their original order.
///
/// # Example
///
/// ```
/// use datagrid_lib::query::SortModel;
///
/// // Single field ordering
/// let order = SortModel::desc("age");
///
/// // Ties on age fall back to name
/// let order = SortModel::desc("age").then_asc("name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortModel {
    specs: Vec<SortSpec>,
}

impl SortModel {
    /// Creates a model that applies no ordering.
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates an ascending order on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            specs: vec![SortSpec::new(field, Direction::Asc)],
        }
    }

    /// Creates a descending order on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            specs: vec![SortSpec::new(field, Direction::Desc)],
        }
    }

    /// Creates an order on a field in the given direction.
    pub fn by(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            specs: vec![SortSpec::new(field, direction)],
        }
    }

    /// Adds a secondary ascending order on a field.
    pub fn then_asc(mut self, field: impl Into<String>) -> Self {
        self.specs.push(SortSpec::new(field, Direction::Asc));
        self
    }

    /// Adds a secondary descending order on a field.
    pub fn then_desc(mut self, field: impl Into<String>) -> Self {
        self.specs.push(SortSpec::new(field, Direction::Desc));
        self
    }

    /// Returns the sort keys in priority order.
    pub fn specs(&self) -> &[SortSpec] {
        &self.specs
    }

    /// Returns the primary sort key, if any.
    pub fn primary(&self) -> Option<&SortSpec> {
        self.specs.first()
    }

    /// Returns `true` if no ordering is applied.
    pub fn is_empty(&self) -> bool {
        self.specs.iter().all(|spec| spec.field.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_toggle() {
        assert_eq!(Direction::Asc.toggled(), Direction::Desc);
        assert_eq!(Direction::Desc.toggled(), Direction::Asc);
        assert_eq!(Direction::Desc.apply(Ordering::Less), Ordering::Greater);
    }

    #[test]
    fn test_sort_model_chain() {
        let order = SortModel::desc("age").then_asc("name");
        let fields: Vec<_> = order
            .specs()
            .iter()
            .map(|s| (s.field.as_str(), s.direction))
            .collect();
        assert_eq!(fields, vec![("age", Direction::Desc), ("name", Direction::Asc)]);
    }

    #[test]
    fn test_empty_field_is_no_order() {
        assert!(SortModel::none().is_empty());
        assert!(SortModel::asc("").is_empty());
        assert!(!SortModel::asc("name").is_empty());
    }
}
