//! Column descriptors

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;

/// Edit validator: `Err(message)` rejects the input; an empty message falls
/// back to "Invalid value".
pub type Validator = Arc<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

/// Semantic type of a column.
///
/// Selects comparison, filtering and edit-parsing behaviour for every value in
/// the column, whatever concrete [`Value`](super::Value) variant it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Case-insensitive text.
    #[default]
    String,
    /// Numeric.
    Number,
    /// True/false.
    Boolean,
    /// Date-time instant.
    Date,
}

impl ColumnType {
    /// Returns the lowercase name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Number => "number",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" => Ok(ColumnType::String),
            "number" => Ok(ColumnType::Number),
            "boolean" => Ok(ColumnType::Boolean),
            "date" => Ok(ColumnType::Date),
            other => Err(ConfigError::Parse(format!("unknown column type '{}'", other))),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Describes one column of the grid.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{Column, ColumnType};
///
/// let columns = vec![
///     Column::new("name", "Name"),
///     Column::new("age", "Age").with_type(ColumnType::Number).with_filterable(false),
/// ];
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct Column {
    /// Field name in each row.
    pub field: String,
    /// Header text.
    #[serde(default)]
    pub header_name: String,
    /// Semantic type.
    #[serde(default, rename = "type")]
    pub column_type: ColumnType,
    /// Width in pixels, if fixed.
    #[serde(default)]
    pub width: Option<f64>,
    /// Whether clicking the header sorts by this column.
    #[serde(default = "default_true")]
    pub sortable: bool,
    /// Whether the column can be resized by dragging.
    #[serde(default = "default_true")]
    pub resizable: bool,
    /// Whether the column accepts a filter criterion.
    #[serde(default = "default_true")]
    pub filterable: bool,
    /// Whether cells can be edited inline.
    #[serde(default)]
    pub editable: bool,
    /// Validator run before an edit is committed.
    #[serde(skip)]
    pub validator: Option<Validator>,
}

impl Column {
    /// Creates a string column.
    pub fn new(field: impl Into<String>, header_name: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header_name: header_name.into(),
            column_type: ColumnType::String,
            width: None,
            sortable: true,
            resizable: true,
            filterable: true,
            editable: false,
            validator: None,
        }
    }

    /// Sets the column type.
    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }

    /// Sets a fixed width in pixels.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets whether the column is sortable.
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Sets whether the column is resizable.
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Sets whether the column accepts a filter criterion.
    pub fn with_filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Enables inline editing.
    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    /// Sets an edit validator.
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("field", &self.field)
            .field("header_name", &self.header_name)
            .field("column_type", &self.column_type)
            .field("width", &self.width)
            .field("sortable", &self.sortable)
            .field("resizable", &self.resizable)
            .field("filterable", &self.filterable)
            .field("editable", &self.editable)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

/// Finds the column declared for `field`.
pub fn find_column<'a>(columns: &'a [Column], field: &str) -> Option<&'a Column> {
    columns.iter().find(|col| col.field == field)
}

/// Returns the declared type of `field`, defaulting to [`ColumnType::String`].
pub fn column_type_of(columns: &[Column], field: &str) -> ColumnType {
    find_column(columns, field)
        .map(|col| col.column_type)
        .unwrap_or_default()
}
