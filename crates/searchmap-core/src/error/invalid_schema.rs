use super::Error;

/// Error when an index definition or registry declaration is invalid.
///
/// This occurs when:
/// - Two fields of one index share an alias
/// - An index has no name or no fields
/// - A hash-backed index maps a nested path
/// - Two declared operations or indexes share a name
#[derive(Debug)]
pub(super) struct InvalidSchemaError {
    message: Box<str>,
}

impl std::error::Error for InvalidSchemaError {}

impl core::fmt::Display for InvalidSchemaError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchemaError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if the root cause is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::InvalidSchema(_))
    }
}
