use super::ProjectionSpec;

/// A search request: a filter query plus reply-shaping options.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Filter query string, `*` for every document
    pub query: String,

    /// `RETURN` clause; `None` returns whole documents
    pub return_fields: Option<ProjectionSpec>,

    /// `LIMIT offset num`
    pub limit: Option<(u64, u64)>,

    pub sort_by: Option<SortBy>,

    /// Ask the backend for relevance scores. Without it every document
    /// scores `1.0`.
    pub with_scores: bool,

    /// Ask the backend for document payloads
    pub with_payloads: bool,

    /// Disable stemming of query terms
    pub verbatim: bool,

    /// Return ids only
    pub no_content: bool,

    /// Query dialect version
    pub dialect: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortBy {
    pub field: String,
    pub ascending: bool,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> SearchQuery {
        SearchQuery {
            query: query.into(),
            return_fields: None,
            limit: None,
            sort_by: None,
            with_scores: false,
            with_payloads: false,
            verbatim: false,
            no_content: false,
            dialect: None,
        }
    }

    /// Matches every document.
    pub fn all() -> SearchQuery {
        SearchQuery::new("*")
    }

    pub fn return_fields(mut self, spec: ProjectionSpec) -> Self {
        self.return_fields = Some(spec);
        self
    }

    pub fn limit(mut self, offset: u64, num: u64) -> Self {
        self.limit = Some((offset, num));
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, ascending: bool) -> Self {
        self.sort_by = Some(SortBy {
            field: field.into(),
            ascending,
        });
        self
    }

    pub fn with_scores(mut self) -> Self {
        self.with_scores = true;
        self
    }

    pub fn with_payloads(mut self) -> Self {
        self.with_payloads = true;
        self
    }

    pub fn verbatim(mut self) -> Self {
        self.verbatim = true;
        self
    }

    pub fn no_content(mut self) -> Self {
        self.no_content = true;
        self
    }

    pub fn dialect(mut self, dialect: u32) -> Self {
        self.dialect = Some(dialect);
        self
    }
}
