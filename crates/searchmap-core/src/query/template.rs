use super::{Args, BoundQuery, ProjectionSpec};
use crate::{Error, Result};

use indexmap::IndexSet;
use std::sync::Arc;

/// A declared query, parsed once and shared read-only between every
/// invocation that binds it.
///
/// Placeholders are written `${name}`, where `name` is an identifier. A `$`
/// that does not open a placeholder (as in `$.tag[0]`) is literal text.
///
/// A placeholder renders the whole value including its delimiters. Tag
/// values bring their own braces, so a tag filter is written `@tag:${tags}`
/// and renders `@tag:{news|sports}`. Writing `@tag:{${tags}}` would render
/// `{{news}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryTemplate {
    raw: String,
    form: TemplateForm,
    pieces: Vec<Piece>,
    params: IndexSet<String>,
}

/// Which wire command a template turns into.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateForm {
    /// Boolean filter query, sent as `FT.SEARCH <index> <query>`
    Filter,

    /// Projection over every document, sent as
    /// `FT.SEARCH <index> * RETURN …`
    Projection(ProjectionSpec),

    /// Load over every document, sent as `FT.AGGREGATE <index> * LOAD …`
    Load(ProjectionSpec),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Piece {
    Literal(String),
    Placeholder(String),
}

impl QueryTemplate {
    /// Parses a search template.
    ///
    /// A template whose first token is a path (`$.tag[0] AS first_tag`) is a
    /// projection; anything else is a filter query. An empty filter matches
    /// every document.
    pub fn parse(raw: &str) -> Result<QueryTemplate> {
        let first = raw.split_whitespace().next().unwrap_or("");

        if first.starts_with('$') && !first.starts_with("${") {
            let spec = projection(raw)?;
            return Ok(QueryTemplate::fixed(raw, TemplateForm::Projection(spec)));
        }

        let pieces = if raw.trim().is_empty() {
            vec![Piece::Literal("*".to_string())]
        } else {
            split(raw)?
        };

        let params = pieces
            .iter()
            .filter_map(|piece| match piece {
                Piece::Placeholder(name) => Some(name.clone()),
                Piece::Literal(_) => None,
            })
            .collect();

        Ok(QueryTemplate {
            raw: raw.to_string(),
            form: TemplateForm::Filter,
            pieces,
            params,
        })
    }

    /// Parses an aggregation template, which must be a load list such as
    /// `$.tag[1] AS tag2`.
    pub fn parse_aggregation(raw: &str) -> Result<QueryTemplate> {
        let spec = projection(raw)?;
        Ok(QueryTemplate::fixed(raw, TemplateForm::Load(spec)))
    }

    fn fixed(raw: &str, form: TemplateForm) -> QueryTemplate {
        QueryTemplate {
            raw: raw.to_string(),
            form,
            pieces: vec![Piece::Literal("*".to_string())],
            params: IndexSet::new(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn form(&self) -> &TemplateForm {
        &self.form
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Declared placeholder names, in order of first appearance.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(String::as_str)
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.params.contains(name)
    }

    /// Substitutes every placeholder.
    ///
    /// Binding is strict: every declared placeholder needs a value, and every
    /// value needs a placeholder. Text that is empty or only whitespace
    /// counts as no value.
    pub fn bind(self: &Arc<Self>, args: Args) -> Result<BoundQuery> {
        if let Some(missing) = self.params().find(|name| !args.contains(name)) {
            return Err(Error::missing_parameter(missing));
        }

        if let Some(unknown) = args.names().find(|name| !self.has_param(name)) {
            return Err(Error::unknown_parameter(unknown));
        }

        let mut query = String::new();

        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => query.push_str(text),
                Piece::Placeholder(name) => {
                    let Some(arg) = args.get(name).filter(|arg| !arg.is_blank()) else {
                        return Err(Error::missing_parameter(name.as_str()));
                    };
                    query.push_str(&arg.render());
                }
            }
        }

        Ok(BoundQuery::new(self.clone(), args, query))
    }
}

fn projection(raw: &str) -> Result<ProjectionSpec> {
    if let Some(offset) = raw.find("${") {
        return Err(Error::template_syntax(
            raw,
            offset,
            "placeholders are not allowed in projection lists",
        ));
    }
    ProjectionSpec::parse(raw)
}

/// Splits a filter template into literal text and placeholders.
fn split(raw: &str) -> Result<Vec<Piece>> {
    let mut pieces = vec![];
    let mut literal_start = 0;
    let mut pos = 0;

    while let Some(found) = raw[pos..].find("${") {
        let open = pos + found;
        let name_start = open + 2;

        let Some(len) = raw[name_start..].find('}') else {
            return Err(Error::template_syntax(raw, open, "unclosed placeholder"));
        };

        let name = &raw[name_start..name_start + len];

        if name.is_empty() {
            return Err(Error::template_syntax(raw, open, "empty placeholder name"));
        }

        if !is_ident(name) {
            return Err(Error::template_syntax(
                raw,
                open,
                format!("invalid placeholder name `{name}`"),
            ));
        }

        if literal_start < open {
            pieces.push(Piece::Literal(raw[literal_start..open].to_string()));
        }
        pieces.push(Piece::Placeholder(name.to_string()));

        pos = name_start + len + 1;
        literal_start = pos;
    }

    if literal_start < raw.len() {
        pieces.push(Piece::Literal(raw[literal_start..].to_string()));
    }

    Ok(pieces)
}

fn is_ident(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(ch) if ch.is_ascii_alphabetic() || ch == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
