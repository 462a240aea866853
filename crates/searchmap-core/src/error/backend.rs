use super::Error;

/// Error reported by the search backend over the command channel.
///
/// The driver classifies the failure at the boundary. Only the unknown-index
/// classification is ever treated as recoverable, and only when dropping an
/// index.
#[derive(Debug)]
pub(super) struct BackendError {
    message: Box<str>,
    unknown_index: bool,
}

impl std::error::Error for BackendError {}

impl core::fmt::Display for BackendError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "backend error: {}", self.message)
    }
}

impl Error {
    /// Creates a backend error carrying the backend's raw error text.
    pub fn backend(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Backend(BackendError {
            message: message.into().into(),
            unknown_index: false,
        }))
    }

    /// Creates a backend error for a command that referenced an index the
    /// backend does not know about.
    pub fn unknown_index(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Backend(BackendError {
            message: message.into().into(),
            unknown_index: true,
        }))
    }

    /// Returns `true` if the root cause is an error reported by the backend.
    pub fn is_backend(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::Backend(_))
    }

    /// Returns `true` if the backend reported that the index does not exist.
    pub fn is_unknown_index(&self) -> bool {
        matches!(
            self.root().kind(),
            super::ErrorKind::Backend(BackendError {
                unknown_index: true,
                ..
            })
        )
    }

    /// The backend's raw error text, if the root cause is a backend error.
    pub fn backend_message(&self) -> Option<&str> {
        match self.root().kind() {
            super::ErrorKind::Backend(err) => Some(&err.message),
            _ => None,
        }
    }
}
