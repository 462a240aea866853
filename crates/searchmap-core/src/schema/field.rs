use super::Path;
use crate::{Error, Result};

/// Maps a nested-document path to a named, typed index field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMapping {
    /// Where the value lives inside the source document
    pub path: Path,

    /// Name the backend exposes the field under, e.g. `@title:` in queries
    pub alias: String,

    /// How the backend indexes the value
    pub ty: FieldType,

    /// When `true`, the field can be used with `SORTBY`
    pub sortable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Full-text field, tokenized and stemmed by the backend
    Text { weight: Option<f64> },

    /// Exact-match tag field; arrays index every element
    Tag { separator: Option<char> },

    /// Numeric field supporting range filters
    Numeric,

    /// Geographic field (`lon,lat`)
    Geo,
}

impl FieldMapping {
    /// Creates a mapping from a locator such as `$.tag[*]`.
    pub fn new(path: &str, alias: impl Into<String>, ty: FieldType) -> Result<FieldMapping> {
        let path = Path::parse(path)?;
        let alias = alias.into();

        if alias.trim().is_empty() {
            return Err(Error::invalid_schema(format!(
                "field `{path}` has an empty alias"
            )));
        }

        Ok(FieldMapping {
            path,
            alias,
            ty,
            sortable: false,
        })
    }

    pub fn text(path: &str, alias: impl Into<String>) -> Result<FieldMapping> {
        FieldMapping::new(path, alias, FieldType::Text { weight: None })
    }

    pub fn tag(path: &str, alias: impl Into<String>) -> Result<FieldMapping> {
        FieldMapping::new(path, alias, FieldType::Tag { separator: None })
    }

    pub fn numeric(path: &str, alias: impl Into<String>) -> Result<FieldMapping> {
        FieldMapping::new(path, alias, FieldType::Numeric)
    }

    pub fn geo(path: &str, alias: impl Into<String>) -> Result<FieldMapping> {
        FieldMapping::new(path, alias, FieldType::Geo)
    }

    pub fn sortable(mut self) -> FieldMapping {
        self.sortable = true;
        self
    }

    /// Sets the relevance weight of a text field. Ignored for other types.
    pub fn weight(mut self, weight: f64) -> FieldMapping {
        if let FieldType::Text { weight: w } = &mut self.ty {
            *w = Some(weight);
        }
        self
    }

    /// Sets the tag separator for hash-backed tag fields. Ignored for other
    /// types.
    pub fn separator(mut self, separator: char) -> FieldMapping {
        if let FieldType::Tag { separator: s } = &mut self.ty {
            *s = Some(separator);
        }
        self
    }
}

impl FieldType {
    /// The keyword used in the `SCHEMA` clause.
    pub fn keyword(&self) -> &'static str {
        match self {
            FieldType::Text { .. } => "TEXT",
            FieldType::Tag { .. } => "TAG",
            FieldType::Numeric => "NUMERIC",
            FieldType::Geo => "GEO",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, FieldType::Text { .. })
    }

    pub fn is_tag(&self) -> bool {
        matches!(self, FieldType::Tag { .. })
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Numeric)
    }
}
