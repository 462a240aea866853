//! Typed projection of documents and rows.
//!
//! The backend returns most values as strings. Conversion is best-effort:
//! `"42"` loads as an `i64`, `"1.5"` as an `f64`, `"true"` as a `bool`, a
//! number as a `String`, and a JSON array string as a `Vec`.
//!
//! Filter queries on JSON indexes return each document as its whole body
//! under the `$` property. Aliases missing from the properties are looked up
//! as top-level members of that body.

use crate::{result::BODY, Error, Result, Value};

use searchmap_core::driver::Properties;
use std::borrow::Cow;

/// Builds a typed record from the named values of one document or row.
pub trait Load: Sized {
    fn load(fields: &Fields<'_>) -> Result<Self>;
}

/// A value type a document field can be converted into.
pub trait FromValue: Sized {
    /// Type name reported when conversion fails.
    const EXPECTED: &'static str;

    /// Converts a present, non-null value. `None` means the value does not
    /// fit the type.
    fn from_value(value: &Value) -> Option<Self>;

    /// The value to use when the field is absent or null.
    fn missing() -> Option<Self> {
        None
    }
}

/// Borrowed view of the properties of one document or row.
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    properties: &'a Properties,

    /// Parsed `$` body, when the properties carry one
    body: Option<serde_json::Value>,
}

impl<'a> Fields<'a> {
    pub fn new(properties: &'a Properties) -> Fields<'a> {
        let body = match properties.get(BODY) {
            Some(Value::String(text)) => serde_json::from_str(text).ok(),
            _ => None,
        };

        Fields { properties, body }
    }

    /// Converts the value under `alias`.
    ///
    /// Fails with a type mismatch if the value cannot be converted, or if it
    /// is absent and `T` is not an `Option`.
    pub fn get<T: FromValue>(&self, alias: &str) -> Result<T> {
        match self.value(alias) {
            Some(value) if !value.is_null() => T::from_value(&value)
                .ok_or_else(|| Error::type_mismatch(alias, T::EXPECTED, value.into_owned())),
            _ => T::missing().ok_or_else(|| Error::type_mismatch(alias, T::EXPECTED, Value::Null)),
        }
    }

    /// The value under `alias`, falling back to the member of the same name
    /// in the `$` body.
    pub fn value(&self, alias: &str) -> Option<Cow<'a, Value>> {
        if let Some(value) = self.properties.get(alias) {
            return Some(Cow::Borrowed(value));
        }

        self.body
            .as_ref()
            .and_then(|body| body.get(alias))
            .map(|json| Cow::Owned(Value::from_json(json)))
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.properties.contains_key(alias)
            || self
                .body
                .as_ref()
                .is_some_and(|body| body.get(alias).is_some())
    }
}

impl Load for Properties {
    fn load(fields: &Fields<'_>) -> Result<Self> {
        Ok(fields.properties.clone())
    }
}

impl FromValue for Value {
    const EXPECTED: &'static str = "value";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }

    fn missing() -> Option<Self> {
        Some(Value::Null)
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(v) => Some(v.clone()),
            Value::I64(_) | Value::F64(_) | Value::Bool(_) => Some(value.to_string()),
            Value::Null | Value::List(_) => None,
        }
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "i64";

    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::I64(v) => Some(v),
            Value::F64(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Some(v as i64),
            Value::String(ref v) => v.trim().parse().ok(),
            _ => None,
        }
    }
}

impl FromValue for i32 {
    const EXPECTED: &'static str = "i32";

    fn from_value(value: &Value) -> Option<Self> {
        i64::from_value(value).and_then(|v| i32::try_from(v).ok())
    }
}

impl FromValue for u64 {
    const EXPECTED: &'static str = "u64";

    fn from_value(value: &Value) -> Option<Self> {
        i64::from_value(value).and_then(|v| u64::try_from(v).ok())
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "f64";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(v) => match v.trim() {
                "inf" | "+inf" => Some(f64::INFINITY),
                "-inf" => Some(f64::NEG_INFINITY),
                v => v.parse().ok(),
            },
            value => value.as_f64(),
        }
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            Value::I64(0) => Some(false),
            Value::I64(1) => Some(true),
            Value::String(v) => match v.trim() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    const EXPECTED: &'static str = "list";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            Value::String(text) if text.trim_start().starts_with('[') => {
                match Value::from_json(&serde_json::from_str(text).ok()?) {
                    Value::List(items) => items.iter().map(T::from_value).collect(),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: &Value) -> Option<Self> {
        T::from_value(value).map(Some)
    }

    fn missing() -> Option<Self> {
        Some(None)
    }
}
