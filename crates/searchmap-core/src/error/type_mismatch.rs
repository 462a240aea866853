use super::Error;
use crate::Value;

/// Error when a mapped value cannot be converted to the caller's declared
/// type.
#[derive(Debug)]
pub(super) struct TypeMismatchError {
    field: Box<str>,
    expected: &'static str,
    value: Value,
}

impl std::error::Error for TypeMismatchError {}

impl core::fmt::Display for TypeMismatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "type mismatch for `{}`: cannot convert {:?} to {}",
            self.field, self.value, self.expected
        )
    }
}

impl Error {
    /// Creates a type mismatch error for the projected `field`.
    pub fn type_mismatch(field: impl Into<String>, expected: &'static str, value: Value) -> Error {
        Error::from(super::ErrorKind::TypeMismatch(TypeMismatchError {
            field: field.into().into(),
            expected,
            value,
        }))
    }

    /// Returns `true` if the root cause is a type mismatch error.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::TypeMismatch(_))
    }
}
