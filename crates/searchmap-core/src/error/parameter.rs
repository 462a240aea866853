use super::Error;

/// A declared placeholder received no value.
#[derive(Debug)]
pub(super) struct MissingParameterError {
    name: Box<str>,
}

impl std::error::Error for MissingParameterError {}

impl core::fmt::Display for MissingParameterError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "missing value for parameter `{}`", self.name)
    }
}

/// A value was supplied for a name the template never declares.
#[derive(Debug)]
pub(super) struct UnknownParameterError {
    name: Box<str>,
}

impl std::error::Error for UnknownParameterError {}

impl core::fmt::Display for UnknownParameterError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no placeholder for parameter `{}`", self.name)
    }
}

impl Error {
    pub fn missing_parameter(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingParameter(MissingParameterError {
            name: name.into().into(),
        }))
    }

    pub fn is_missing_parameter(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::MissingParameter(_))
    }

    pub fn unknown_parameter(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownParameter(UnknownParameterError {
            name: name.into().into(),
        }))
    }

    pub fn is_unknown_parameter(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::UnknownParameter(_))
    }

    /// The offending parameter name of a binding error.
    pub fn parameter_name(&self) -> Option<&str> {
        match self.root().kind() {
            super::ErrorKind::MissingParameter(err) => Some(&err.name),
            super::ErrorKind::UnknownParameter(err) => Some(&err.name),
            _ => None,
        }
    }
}
