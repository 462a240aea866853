use super::escape;

use std::collections::{BTreeSet, HashSet};

/// A value bound to a template placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Free text, escaped before substitution
    Text(String),

    /// Numeric literal, substituted verbatim
    Number(Number),

    /// Set of tag values, rendered as a `{a|b}` disjunction group. The set is
    /// ordered and deduplicated, so rendering does not depend on insertion
    /// order.
    Tags(BTreeSet<String>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I64(i64),
    F64(f64),
}

impl Arg {
    pub fn text(value: impl Into<String>) -> Arg {
        Arg::Text(value.into())
    }

    pub fn tags<T: Into<String>>(values: impl IntoIterator<Item = T>) -> Arg {
        Arg::Tags(values.into_iter().map(Into::into).collect())
    }

    /// `true` for text with nothing but whitespace, which renders as no term.
    pub fn is_blank(&self) -> bool {
        matches!(self, Arg::Text(value) if value.trim().is_empty())
    }

    /// Renders the value as query syntax.
    pub fn render(&self) -> String {
        match self {
            Arg::Text(value) => escape::text(value),
            Arg::Number(number) => number.to_string(),
            Arg::Tags(values) => {
                let values: Vec<_> = values.iter().map(|value| escape::tag(value)).collect();
                format!("{{{}}}", values.join("|"))
            }
        }
    }
}

impl core::fmt::Display for Number {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            Number::I64(v) => write!(f, "{v}"),
            Number::F64(v) if v == f64::INFINITY => f.write_str("+inf"),
            Number::F64(v) if v == f64::NEG_INFINITY => f.write_str("-inf"),
            Number::F64(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Text(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Text(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Text(value.clone())
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Number(Number::I64(value))
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Arg::Number(Number::I64(value.into()))
    }
}

impl From<u32> for Arg {
    fn from(value: u32) -> Self {
        Arg::Number(Number::I64(value.into()))
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Number(Number::F64(value))
    }
}

impl<T: Into<String>> From<Vec<T>> for Arg {
    fn from(values: Vec<T>) -> Self {
        Arg::tags(values)
    }
}

impl<T: Into<String>, const N: usize> From<[T; N]> for Arg {
    fn from(values: [T; N]) -> Self {
        Arg::tags(values)
    }
}

impl<T: Into<String>> From<HashSet<T>> for Arg {
    fn from(values: HashSet<T>) -> Self {
        Arg::tags(values)
    }
}

impl<T: Into<String>> From<BTreeSet<T>> for Arg {
    fn from(values: BTreeSet<T>) -> Self {
        Arg::tags(values)
    }
}
