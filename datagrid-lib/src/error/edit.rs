//! EditError for inline cell editing

use super::FieldError;

/// Error type for rejected cell edits.
///
/// The display text of each variant is the message shown next to the cell.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// The column's validator rejected the input.
    #[error("{0}")]
    Rejected(String),

    /// The input is not a number.
    #[error("Please enter a valid number")]
    InvalidNumber,

    /// The input is not a date.
    #[error("Please enter a valid date")]
    InvalidDate,

    /// The input is not a recognised yes/no value.
    #[error("Please enter Yes/No or True/False")]
    InvalidBoolean,

    /// The column does not allow editing.
    #[error("Column '{field}' is not editable")]
    NotEditable { field: String },

    /// No edit is in progress.
    #[error("No cell is being edited")]
    NotEditing,

    /// The edited field has no column.
    #[error(transparent)]
    Field(#[from] FieldError),
}

impl EditError {
    /// Creates a validator rejection, falling back to a generic message.
    pub fn rejected(message: Option<String>) -> Self {
        Self::Rejected(message.unwrap_or_else(|| "Invalid value".to_string()))
    }

    /// Creates a new not-editable error.
    pub fn not_editable(field: impl Into<String>) -> Self {
        Self::NotEditable {
            field: field.into(),
        }
    }
}
