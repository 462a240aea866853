use super::FieldMapping;
use crate::{Error, Result};

use std::collections::HashSet;

/// Everything needed to (re)create one search index.
///
/// Definitions are configuration: built once, then only ever recreated
/// wholesale on schema change.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDefinition {
    /// Index name, unique within the backend
    pub name: String,

    /// Kind of document the index reads
    pub source: SourceKind,

    /// Key prefixes selecting which documents are indexed. Empty means every
    /// key of the source kind.
    pub prefixes: Vec<String>,

    /// Optional backend filter expression applied at indexing time
    pub filter: Option<String>,

    /// Indexed fields, in `SCHEMA` order
    pub fields: Vec<FieldMapping>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Documents stored as JSON values
    Json,

    /// Documents stored as flat hashes
    Hash,
}

#[derive(Debug)]
pub struct IndexBuilder {
    name: String,
    source: SourceKind,
    prefixes: Vec<String>,
    filter: Option<String>,
    fields: Vec<FieldMapping>,
}

impl IndexDefinition {
    /// Builds and validates a definition.
    pub fn build(
        name: impl Into<String>,
        source: SourceKind,
        fields: impl IntoIterator<Item = FieldMapping>,
    ) -> Result<IndexDefinition> {
        let mut builder = IndexDefinition::builder(name).on(source);
        for field in fields {
            builder = builder.field(field);
        }
        builder.build()
    }

    pub fn builder(name: impl Into<String>) -> IndexBuilder {
        IndexBuilder {
            name: name.into(),
            source: SourceKind::Json,
            prefixes: vec![],
            filter: None,
            fields: vec![],
        }
    }

    /// Looks up a field by its alias.
    pub fn field(&self, alias: &str) -> Option<&FieldMapping> {
        self.fields.iter().find(|field| field.alias == alias)
    }

    /// The identifier the backend reads `field` from: the JSON path for JSON
    /// sources, the bare hash field name for hash sources.
    pub fn source_identifier(&self, field: &FieldMapping) -> String {
        match (self.source, field.path.as_single_member()) {
            (SourceKind::Hash, Some(name)) => name.to_string(),
            _ => field.path.to_string(),
        }
    }

    /// Returns a copy of this definition under another name.
    pub fn renamed(&self, name: impl Into<String>) -> IndexDefinition {
        IndexDefinition {
            name: name.into(),
            ..self.clone()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_schema("index name is empty"));
        }

        if self.fields.is_empty() {
            return Err(Error::invalid_schema(format!(
                "index `{}` declares no fields",
                self.name
            )));
        }

        let mut aliases = HashSet::new();

        for field in &self.fields {
            if !aliases.insert(&field.alias[..]) {
                return Err(Error::invalid_schema(format!(
                    "index `{}` maps alias `{}` more than once",
                    self.name, field.alias
                )));
            }

            if self.source == SourceKind::Hash && field.path.as_single_member().is_none() {
                return Err(Error::invalid_schema(format!(
                    "hash index `{}` can only map top-level fields such as `$.name`, got `{}`",
                    self.name, field.path
                )));
            }
        }

        Ok(())
    }
}

impl IndexBuilder {
    pub fn on(mut self, source: SourceKind) -> Self {
        self.source = source;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn field(mut self, field: FieldMapping) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> Result<IndexDefinition> {
        let definition = IndexDefinition {
            name: self.name,
            source: self.source,
            prefixes: self.prefixes,
            filter: self.filter,
            fields: self.fields,
        };
        definition.validate()?;
        Ok(definition)
    }
}

impl SourceKind {
    /// The keyword used in the `ON` clause.
    pub fn keyword(self) -> &'static str {
        match self {
            SourceKind::Json => "JSON",
            SourceKind::Hash => "HASH",
        }
    }
}
