use super::Error;

/// Error when a nested-document locator is malformed.
///
/// Raised locally while parsing; a malformed path is never sent to the
/// backend.
#[derive(Debug)]
pub(super) struct InvalidPathError {
    path: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for InvalidPathError {}

impl core::fmt::Display for InvalidPathError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid path `{}`: {}", self.path, self.reason)
    }
}

impl Error {
    /// Creates an invalid path error for `path`.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidPath(InvalidPathError {
            path: path.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if the root cause is an invalid path error.
    pub fn is_invalid_path(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::InvalidPath(_))
    }
}
