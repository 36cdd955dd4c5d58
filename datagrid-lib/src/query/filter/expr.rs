//! Filter expression parsing.

use std::fmt;

/// Comparison operator of a filter expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `=`
    Eq,
    /// `!=`
    Ne,
}

impl Operator {
    /// Operator tokens in match priority: two-character tokens come before the
    /// one-character tokens they start with.
    pub const TOKENS: [(&'static str, Operator); 6] = [
        (">=", Operator::Ge),
        ("<=", Operator::Le),
        (">", Operator::Gt),
        ("<", Operator::Lt),
        ("=", Operator::Eq),
        ("!=", Operator::Ne),
    ];

    /// Returns the token of this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Eq => "=",
            Operator::Ne => "!=",
        }
    }

    /// Applies this operator to two comparable values.
    pub fn test<T: PartialOrd + ?Sized>(&self, left: &T, right: &T) -> bool {
        match self {
            Operator::Gt => left > right,
            Operator::Ge => left >= right,
            Operator::Lt => left < right,
            Operator::Le => left <= right,
            Operator::Eq => left == right,
            Operator::Ne => left != right,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed filter string: an optional operator and its operand.
///
/// Without an operator the default comparison applies: substring match for
/// string columns, equality for the others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterExpr {
    pub operator: Option<Operator>,
    pub value: String,
}

/// Splits a filter string into operator and operand.
///
/// The input is trimmed, checked for a leading operator token in the order of
/// [`Operator::TOKENS`], and the remainder trimmed again.
///
/// # Example
///
/// ```
/// use datagrid_lib::query::{parse_filter_expression, Operator};
///
/// let expr = parse_filter_expression(" >= 5 ");
/// assert_eq!(expr.operator, Some(Operator::Ge));
/// assert_eq!(expr.value, "5");
///
/// let expr = parse_filter_expression("jo");
/// assert_eq!(expr.operator, None);
/// assert_eq!(expr.value, "jo");
/// ```
pub fn parse_filter_expression(input: &str) -> FilterExpr {
    let trimmed = input.trim();

    for (token, operator) in Operator::TOKENS {
        if let Some(rest) = trimmed.strip_prefix(token) {
            return FilterExpr {
                operator: Some(operator),
                value: rest.trim().to_string(),
            };
        }
    }

    FilterExpr {
        operator: None,
        value: trimmed.to_string(),
    }
}
