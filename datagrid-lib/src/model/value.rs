//! Value enum for dynamic cell values

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde::Serialize;

use super::coerce::parse_instant;
use super::coerce::parse_number;

/// A dynamic value held by one cell of a row.
///
/// The grid distinguishes four semantic column types (string, number,
/// boolean, date); the variants below are the concrete shapes a dataset can
/// deliver for them. Which semantics apply is decided by the column, not by
/// the variant, so a `String("30")` in a number column compares as `30`.
///
/// # Type Mapping
///
/// | JSON / Rust       | Variant     |
/// |-------------------|-------------|
/// | null, missing     | `Null`      |
/// | boolean           | `Bool`      |
/// | integer           | `Int`       |
/// | float             | `Float`     |
/// | `Decimal`         | `Decimal`   |
/// | string            | `String`    |
/// | `DateTime<Utc>`   | `DateTime`  |
///
/// # Example
///
/// ```
/// use datagrid_lib::model::Value;
///
/// let name = Value::from("Alice");
/// let age = Value::from(30);
/// let active = Value::from(true);
/// let empty = Value::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null or absent value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// Date and time instant.
    DateTime(DateTime<Utc>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this is a null value or an empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Decimal(_) => "decimal",
            Value::DateTime(_) => "datetime",
        }
    }

    /// Returns the string slice if this is a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    // =========================================================================
    // Coercions
    //
    // Used for comparison only; the stored value is never changed.
    // =========================================================================

    /// Numeric conversion.
    ///
    /// Blank text is `0`, booleans are `0`/`1`, dates are epoch milliseconds and
    /// anything unparsable (including null) is `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null => f64::NAN,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Int(n) => *n as f64,
            Value::Float(n) => *n,
            Value::String(s) => parse_number(s),
            Value::Decimal(d) => d.to_f64().unwrap_or(f64::NAN),
            Value::DateTime(dt) => dt.timestamp_millis() as f64,
        }
    }

    /// Date conversion to epoch milliseconds; `NaN` for an invalid date.
    ///
    /// Numbers are taken as epoch milliseconds, text is parsed.
    pub fn to_instant(&self) -> f64 {
        match self {
            Value::DateTime(dt) => dt.timestamp_millis() as f64,
            Value::String(s) => parse_instant(s)
                .map(|dt| dt.timestamp_millis() as f64)
                .unwrap_or(f64::NAN),
            Value::Null => f64::NAN,
            other => other.to_number(),
        }
    }

    /// Truthiness.
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Decimal(d) => !d.is_zero(),
            Value::DateTime(_) => true,
        }
    }

    /// Generic conversion to display text.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(n) => format_float(*n),
            Value::String(s) => s.clone(),
            Value::Decimal(d) => d.normalize().to_string(),
            Value::DateTime(dt) => dt.to_rfc3339(),
        }
    }
}

/// Shortest text for a float, switching to exponent form (`1e+21`, `1.5e-7`)
/// outside `[1e-6, 1e21)` in magnitude.
fn format_float(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if (1e-6..1e21).contains(&n.abs()) {
        n.to_string()
    } else {
        let text = format!("{:e}", n);
        match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => text,
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}
