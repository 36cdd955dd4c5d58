//! Inline cell editing.

use crate::error::EditError;
use crate::model::Column;
use crate::model::ColumnType;
use crate::model::DisplayFormat;
use crate::model::Row;
use crate::model::RowKey;
use crate::model::Value;
use crate::model::parse_instant;

/// Converts edit input to a cell value for `column`.
///
/// The column's validator runs first. The input is then converted by column
/// type: numbers and dates must parse, booleans accept `true`/`yes`/`1` and
/// `false`/`no`/`0` in any case, strings are kept as typed.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{Column, ColumnType, Value};
/// use datagrid_lib::view::parse_edit;
///
/// let age = Column::new("age", "Age").with_type(ColumnType::Number);
/// assert_eq!(parse_edit(&age, "31").unwrap(), Value::Float(31.0));
/// assert!(parse_edit(&age, "thirty").is_err());
/// ```
pub fn parse_edit(column: &Column, input: &str) -> Result<Value, EditError> {
    if let Some(validator) = &column.validator {
        validator(input).map_err(|message| {
            EditError::rejected(Some(message).filter(|m| !m.is_empty()))
        })?;
    }

    match column.column_type {
        ColumnType::String => Ok(Value::String(input.to_string())),
        ColumnType::Number => parse_float(input)
            .map(Value::Float)
            .ok_or(EditError::InvalidNumber),
        ColumnType::Date => parse_instant(input)
            .map(Value::DateTime)
            .ok_or(EditError::InvalidDate),
        ColumnType::Boolean => match input.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Value::Bool(true)),
            "false" | "no" | "0" => Ok(Value::Bool(false)),
            _ => Err(EditError::InvalidBoolean),
        },
    }
}

/// Reads the leading number of the input, ignoring trailing text.
fn parse_float(input: &str) -> Option<f64> {
    let text = input.trim_start();
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned.starts_with("Infinity") {
        let n = f64::INFINITY;
        return Some(if text.starts_with('-') { -n } else { n });
    }

    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;
    let bytes = text.as_bytes();

    while end < bytes.len() {
        let b = bytes[end];
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'+' | b'-' if end == 0 || matches!(bytes[end - 1], b'e' | b'E') => {}
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if seen_digit && !seen_exp => seen_exp = true,
            _ => break,
        }
        end += 1;
    }

    // Back off an exponent marker or sign with no digits after it.
    let mut candidate = &text[..end];
    while !candidate.is_empty() {
        if let Ok(n) = candidate.parse::<f64>() {
            return Some(n);
        }
        candidate = &candidate[..candidate.len() - 1];
    }
    None
}

/// Renders a cell value for display under its column type.
///
/// Dates use the date format, booleans read `Yes`/`No`, null is blank.
pub fn display_value(value: &Value, column_type: ColumnType, format: &DisplayFormat) -> String {
    match (column_type, value) {
        (_, Value::Null) => String::new(),
        (ColumnType::Date, Value::DateTime(dt)) => format.date_text(dt),
        (ColumnType::Boolean, Value::Bool(true)) => "Yes".to_string(),
        (ColumnType::Boolean, Value::Bool(false)) => "No".to_string(),
        (_, other) => other.to_text(),
    }
}

/// A committed edit: the new value of one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellChange {
    pub row_key: RowKey,
    pub field: String,
    pub value: Value,
}

impl CellChange {
    /// Returns `row` with this change applied. The input row is untouched.
    pub fn apply(&self, row: &Row) -> Row {
        row.with_value(self.field.clone(), self.value.clone())
    }
}

/// One cell being edited.
///
/// The session holds the text being typed and the last error. A failed
/// commit keeps the session open with the error; cancel restores the
/// original text.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    row_key: RowKey,
    field: String,
    original: String,
    input: String,
    error: Option<EditError>,
}

impl EditSession {
    /// Opens an edit on `field` of `row`.
    pub fn begin(
        row: &Row,
        column: &Column,
        id_field: &str,
        format: &DisplayFormat,
    ) -> Result<Self, EditError> {
        if !column.editable {
            return Err(EditError::not_editable(&column.field));
        }
        let original = display_value(row.value(&column.field), column.column_type, format);
        Ok(Self {
            row_key: row.key(id_field),
            field: column.field.clone(),
            input: original.clone(),
            original,
            error: None,
        })
    }

    /// Key of the row being edited.
    pub fn row_key(&self) -> &RowKey {
        &self.row_key
    }

    /// Field being edited.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Current input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Error from the last commit attempt.
    pub fn error(&self) -> Option<&EditError> {
        self.error.as_ref()
    }

    /// Replaces the input text and clears any error.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.error = None;
    }

    /// Converts the input. On failure the error is kept and returned.
    pub fn commit(&mut self, column: &Column) -> Result<CellChange, EditError> {
        match parse_edit(column, &self.input) {
            Ok(value) => Ok(CellChange {
                row_key: self.row_key.clone(),
                field: self.field.clone(),
                value,
            }),
            Err(err) => {
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Restores the original text and clears any error.
    pub fn cancel(&mut self) {
        self.input = self.original.clone();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_parse_number_leading() {
        assert_eq!(parse_float("42"), Some(42.0));
        assert_eq!(parse_float(" 3.5kg"), Some(3.5));
        assert_eq!(parse_float("1e3"), Some(1000.0));
        assert_eq!(parse_float("2e"), Some(2.0));
        assert_eq!(parse_float("-.5"), Some(-0.5));
        assert_eq!(parse_float("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float("abc"), None);
        assert_eq!(parse_float(""), None);
    }

    #[test]
    fn test_parse_edit_by_type() {
        let date = Column::new("joined", "Joined").with_type(ColumnType::Date);
        assert_eq!(
            parse_edit(&date, "2023-01-15").unwrap(),
            Value::DateTime(Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_edit(&date, "someday"), Err(EditError::InvalidDate));

        let active = Column::new("active", "Active").with_type(ColumnType::Boolean);
        assert_eq!(parse_edit(&active, "No").unwrap(), Value::Bool(false));
        assert_eq!(parse_edit(&active, "maybe"), Err(EditError::InvalidBoolean));

        let name = Column::new("name", "Name");
        assert_eq!(parse_edit(&name, " Bob ").unwrap(), Value::from(" Bob "));
    }

    #[test]
    fn test_validator_runs_first() {
        let name = Column::new("name", "Name").with_validator(|input| {
            if input.is_empty() {
                Err("Name is required".to_string())
            } else {
                Ok(())
            }
        });
        assert_eq!(
            parse_edit(&name, "").unwrap_err().to_string(),
            "Name is required"
        );

        let code = Column::new("code", "Code").with_validator(|_| Err(String::new()));
        assert_eq!(parse_edit(&code, "x").unwrap_err().to_string(), "Invalid value");
    }

    #[test]
    fn test_display_value() {
        let format = DisplayFormat::default();
        let dt = Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(display_value(&Value::from(dt), ColumnType::Date, &format), "1/15/2023");
        assert_eq!(display_value(&Value::from(true), ColumnType::Boolean, &format), "Yes");
        assert_eq!(display_value(&Value::from(30), ColumnType::Number, &format), "30");
        assert_eq!(display_value(&Value::Null, ColumnType::String, &format), "");
    }

    #[test]
    fn test_session_commit_and_cancel() {
        let column = Column::new("age", "Age").with_type(ColumnType::Number).editable();
        let row = Row::new().set("id", 7).set("age", 30);
        let format = DisplayFormat::default();

        let mut session = EditSession::begin(&row, &column, "id", &format).unwrap();
        assert_eq!(session.input(), "30");

        session.set_input("old");
        assert_eq!(session.commit(&column), Err(EditError::InvalidNumber));
        assert_eq!(session.error(), Some(&EditError::InvalidNumber));

        session.cancel();
        assert_eq!(session.input(), "30");
        assert!(session.error().is_none());

        session.set_input("31");
        let change = session.commit(&column).unwrap();
        assert_eq!(change.row_key, RowKey::from("7"));
        let edited = change.apply(&row);
        assert_eq!(edited.get_float("age").unwrap(), Some(31.0));
        assert_eq!(row.get_int("age").unwrap(), Some(30));
    }

    #[test]
    fn test_session_requires_editable_column() {
        let column = Column::new("age", "Age");
        let row = Row::new().set("age", 30);
        assert!(matches!(
            EditSession::begin(&row, &column, "id", &DisplayFormat::default()),
            Err(EditError::NotEditable { .. })
        ));
    }
}
