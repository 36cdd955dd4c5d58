//! Evaluation of one value against one filter operand.

use super::Operator;
use crate::model::ColumnType;
use crate::model::Value;

/// Filter operand words read as `true` for boolean columns.
const TRUE_WORDS: [&str; 3] = ["true", "yes", "1"];

/// Tests `value` against a filter operand under `column_type`.
///
/// Both sides are coerced the way sorting coerces them (dates reduced to epoch
/// milliseconds). A text operand for a boolean column is true only for
/// `true`, `yes` or `1` (any case).
///
/// With no operator, string columns test case-insensitive containment and
/// the other types test equality. Malformed numbers and dates coerce to `NaN`,
/// so every ordering operator and equality against them is `false`.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{ColumnType, Value};
/// use datagrid_lib::query::{matches_filter, Operator};
///
/// assert!(matches_filter(&Value::from(45), &Value::from("30"), Some(Operator::Gt), ColumnType::Number));
/// assert!(matches_filter(&Value::from("John"), &Value::from("jo"), None, ColumnType::String));
/// ```
pub fn matches_filter(
    value: &Value,
    operand: &Value,
    operator: Option<Operator>,
    column_type: ColumnType,
) -> bool {
    match column_type {
        ColumnType::Number => compare(&value.to_number(), &operand.to_number(), operator),
        ColumnType::Date => compare(&value.to_instant(), &operand.to_instant(), operator),
        ColumnType::Boolean => {
            let operand = match operand {
                Value::String(s) => TRUE_WORDS.contains(&s.to_lowercase().as_str()),
                other => other.to_bool(),
            };
            compare(&value.to_bool(), &operand, operator)
        }
        ColumnType::String => {
            let value = value.to_text().to_lowercase();
            let operand = operand.to_text().to_lowercase();
            match operator {
                Some(operator) => operator.test(value.as_str(), operand.as_str()),
                None => value.contains(&operand),
            }
        }
    }
}

fn compare<T: PartialOrd>(value: &T, operand: &T, operator: Option<Operator>) -> bool {
    operator.unwrap_or(Operator::Eq).test(value, operand)
}
