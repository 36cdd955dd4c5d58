//! Per-field filtering of rows.

mod expr;
mod matcher;

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

pub use expr::*;
pub use matcher::*;

use crate::model::Column;
use crate::model::ColumnType;
use crate::model::Row;
use crate::model::Value;
use crate::model::column_type_of;

/// Filter criteria keyed by field name.
///
/// A criterion is either text, which may start with a comparison operator
/// (`">30"`, `"!= Bob"`), or a typed value compared for equality. Null and
/// empty-text criteria place no constraint on their field. All constraints
/// must hold for a row to pass.
///
/// # Example
///
/// ```
/// use datagrid_lib::query::FilterModel;
///
/// let filters = FilterModel::new()
///     .with("age", ">30")
///     .with("active", true);
/// assert!(filters.is_active());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterModel {
    criteria: HashMap<String, Value>,
}

impl FilterModel {
    /// Creates an empty filter model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the criterion for a field (builder pattern).
    pub fn with(mut self, field: impl Into<String>, criterion: impl Into<Value>) -> Self {
        self.set(field, criterion);
        self
    }

    /// Sets the criterion for a field.
    pub fn set(&mut self, field: impl Into<String>, criterion: impl Into<Value>) {
        self.criteria.insert(field.into(), criterion.into());
    }

    /// Removes the criterion for a field.
    pub fn clear_field(&mut self, field: &str) -> Option<Value> {
        self.criteria.remove(field)
    }

    /// Removes all criteria.
    pub fn clear(&mut self) {
        self.criteria.clear();
    }

    /// Returns the criterion for a field, if set.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.criteria.get(field)
    }

    /// Iterates over all criteria.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.criteria.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns `true` if no criteria are set.
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Returns `true` if at least one criterion constrains its field.
    pub fn is_active(&self) -> bool {
        self.criteria.values().any(|v| !v.is_blank())
    }
}

/// One active criterion, parsed and typed once per filtering pass.
#[derive(Debug, Clone)]
struct Constraint<'f> {
    field: &'f str,
    column_type: ColumnType,
    operator: Option<Operator>,
    operand: Value,
}

impl<'f> Constraint<'f> {
    fn compile(field: &'f str, criterion: &Value, columns: &[Column]) -> Option<Self> {
        if criterion.is_blank() {
            return None;
        }

        let column_type = column_type_of(columns, field);
        let (operator, operand) = match criterion {
            Value::String(text) => {
                let expr = parse_filter_expression(text);
                (expr.operator, Value::String(expr.value))
            }
            other => (Some(Operator::Eq), other.clone()),
        };

        Some(Self {
            field,
            column_type,
            operator,
            operand,
        })
    }

    fn admits(&self, row: &Row) -> bool {
        let value = row.value(self.field);
        // Absent data never satisfies an active constraint.
        if value.is_null() {
            return false;
        }
        matches_filter(value, &self.operand, self.operator, self.column_type)
    }
}

/// Filters rows by `filters` and returns the matching copies in input order.
///
/// Field types come from `columns` (undeclared fields are strings). An empty
/// model returns every row.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{Column, ColumnType, Row};
/// use datagrid_lib::query::{filter_rows, FilterModel};
///
/// let rows = vec![
///     Row::new().set("name", "John").set("age", 30),
///     Row::new().set("name", "Bob").set("age", 45),
/// ];
/// let columns = vec![Column::new("age", "Age").with_type(ColumnType::Number)];
///
/// let older = filter_rows(&rows, &FilterModel::new().with("age", ">30"), &columns);
/// assert_eq!(older.len(), 1);
/// ```
pub fn filter_rows(rows: &[Row], filters: &FilterModel, columns: &[Column]) -> Vec<Row> {
    let refs: Vec<&Row> = rows.iter().collect();
    filter_refs(&refs, filters, columns)
        .into_iter()
        .cloned()
        .collect()
}

/// Filters borrowed rows. See [`filter_rows`].
pub fn filter_refs<'a>(rows: &[&'a Row], filters: &FilterModel, columns: &[Column]) -> Vec<&'a Row> {
    let constraints: Vec<Constraint<'_>> = filters
        .iter()
        .filter_map(|(field, criterion)| Constraint::compile(field, criterion, columns))
        .collect();

    if constraints.is_empty() {
        return rows.to_vec();
    }

    let matched: Vec<&'a Row> = rows
        .iter()
        .copied()
        .filter(|row| constraints.iter().all(|c| c.admits(row)))
        .collect();

    log::trace!(
        "filter kept {} of {} rows ({} constraint(s))",
        matched.len(),
        rows.len(),
        constraints.len()
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Vec<Row> {
        vec![
            Row::new().set("name", "John").set("age", 30).set("active", true),
            Row::new().set("name", "Alice").set("age", 25).set("active", false),
            Row::new().set("name", "Bob").set("age", 45).set("active", true),
            Row::new().set("name", "Zoe").set("age", 28),
        ]
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name"),
            Column::new("age", "Age").with_type(ColumnType::Number),
            Column::new("active", "Active").with_type(ColumnType::Boolean),
        ]
    }

    fn names(rows: &[Row]) -> Vec<&str> {
        rows.iter()
            .map(|r| r.get_string("name").unwrap().unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_empty_model_keeps_all() {
        let rows = people();
        assert_eq!(filter_rows(&rows, &FilterModel::new(), &columns()), rows);
    }

    #[test]
    fn test_blank_criteria_keep_all() {
        let rows = people();
        let filters = FilterModel::new().with("name", "").with("age", Value::Null);
        assert!(!filters.is_active());
        assert_eq!(filter_rows(&rows, &filters, &columns()), rows);
    }

    #[test]
    fn test_expression_filter() {
        let filtered = filter_rows(&people(), &FilterModel::new().with("age", ">30"), &columns());
        assert_eq!(names(&filtered), vec!["Bob"]);
    }

    #[test]
    fn test_default_contains() {
        let filtered = filter_rows(&people(), &FilterModel::new().with("name", "jo"), &columns());
        assert_eq!(names(&filtered), vec!["John"]);
    }

    #[test]
    fn test_and_across_fields() {
        let filters = FilterModel::new().with("age", ">=28").with("name", "o");
        let filtered = filter_rows(&people(), &filters, &columns());
        assert_eq!(names(&filtered), vec!["John", "Bob", "Zoe"]);

        let filters = filters.with("active", "yes");
        let filtered = filter_rows(&people(), &filters, &columns());
        assert_eq!(names(&filtered), vec!["John", "Bob"]);
    }

    #[test]
    fn test_missing_value_fails_active_filter() {
        // Zoe has no "active" field.
        let filters = FilterModel::new().with("active", false);
        let filtered = filter_rows(&people(), &filters, &columns());
        assert_eq!(names(&filtered), vec!["Alice"]);
    }

    #[test]
    fn test_typed_criterion_is_equality() {
        let filtered = filter_rows(&people(), &FilterModel::new().with("age", 25), &columns());
        assert_eq!(names(&filtered), vec!["Alice"]);
    }

    #[test]
    fn test_undeclared_field_filters_as_string() {
        let rows = vec![Row::new().set("city", "Berlin"), Row::new().set("city", "Paris")];
        let filtered = filter_rows(&rows, &FilterModel::new().with("city", "ER"), &[]);
        assert_eq!(filtered, vec![Row::new().set("city", "Berlin")]);
    }

    #[test]
    fn test_non_numeric_operand_matches_nothing() {
        let filtered = filter_rows(&people(), &FilterModel::new().with("age", ">abc"), &columns());
        assert!(filtered.is_empty());
    }
}
