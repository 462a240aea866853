use super::Error;

/// Error when a backend reply has an unexpected structure.
///
/// This occurs when:
/// - A search reply is handed to the aggregation mapper (or the reverse)
/// - A reply cannot be framed into documents or rows
///
/// The backend answered, but the shape doesn't match what the operation
/// expected.
#[derive(Debug)]
pub(super) struct InvalidResultError {
    message: Box<str>,
}

impl std::error::Error for InvalidResultError {}

impl core::fmt::Display for InvalidResultError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid result: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid result error.
    pub fn invalid_result(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidResult(InvalidResultError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if the root cause is an invalid result error.
    pub fn is_invalid_result(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::InvalidResult(_))
    }
}
