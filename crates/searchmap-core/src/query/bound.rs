use super::{Args, QueryTemplate, TemplateForm};

use std::sync::Arc;

/// A template with every placeholder substituted. Request-local.
#[derive(Debug, Clone)]
pub struct BoundQuery {
    template: Arc<QueryTemplate>,
    args: Args,
    query: String,
}

impl BoundQuery {
    pub(super) fn new(template: Arc<QueryTemplate>, args: Args, query: String) -> BoundQuery {
        BoundQuery {
            template,
            args,
            query,
        }
    }

    pub fn template(&self) -> &Arc<QueryTemplate> {
        &self.template
    }

    pub fn form(&self) -> &TemplateForm {
        self.template.form()
    }

    pub fn args(&self) -> &Args {
        &self.args
    }

    /// The query string sent to the backend.
    pub fn query(&self) -> &str {
        &self.query
    }
}
