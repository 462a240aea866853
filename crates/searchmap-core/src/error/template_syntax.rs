use super::Error;

/// Error when a query template's placeholder syntax is malformed.
#[derive(Debug)]
pub(super) struct TemplateSyntaxError {
    template: Box<str>,
    offset: usize,
    message: Box<str>,
}

impl std::error::Error for TemplateSyntaxError {}

impl core::fmt::Display for TemplateSyntaxError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "template syntax error at byte {} of `{}`: {}",
            self.offset, self.template, self.message
        )
    }
}

impl Error {
    /// Creates a template syntax error pointing at byte `offset` of
    /// `template`.
    pub fn template_syntax(
        template: impl Into<String>,
        offset: usize,
        message: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::TemplateSyntax(TemplateSyntaxError {
            template: template.into().into(),
            offset,
            message: message.into().into(),
        }))
    }

    /// Returns `true` if the root cause is a template syntax error.
    pub fn is_template_syntax(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::TemplateSyntax(_))
    }
}
