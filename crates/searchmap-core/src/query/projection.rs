use crate::{schema::Path, Error, Result};

use std::fmt;

/// Ordered `path AS alias` pairs, used for `RETURN` and `LOAD` clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectionSpec {
    pub fields: Vec<ProjectionField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionField {
    pub path: Path,
    pub alias: String,
}

impl ProjectionSpec {
    pub fn new() -> ProjectionSpec {
        ProjectionSpec::default()
    }

    /// Adds `path AS alias`.
    pub fn field(mut self, path: &str, alias: impl Into<String>) -> Result<ProjectionSpec> {
        self.fields.push(ProjectionField {
            path: Path::parse(path)?,
            alias: alias.into(),
        });
        Ok(self)
    }

    /// Parses a projection list such as `$.tag[0] AS first_tag, $.title`.
    ///
    /// Entries are separated by whitespace or commas. An entry without `AS`
    /// is exposed under its own path text.
    pub fn parse(src: &str) -> Result<ProjectionSpec> {
        let tokens = tokenize(src)?;
        let mut fields = vec![];
        let mut tokens = tokens.into_iter().peekable();

        while let Some(token) = tokens.next() {
            if token.eq_ignore_ascii_case("as") {
                return Err(Error::template_syntax(
                    src,
                    0,
                    "`AS` must follow a path",
                ));
            }

            let path = Path::parse(&token)?;

            let alias = match tokens.peek() {
                Some(next) if next.eq_ignore_ascii_case("as") => {
                    tokens.next();
                    match tokens.next() {
                        Some(alias) if !alias.starts_with('$') => alias,
                        _ => {
                            return Err(Error::template_syntax(
                                src,
                                src.len(),
                                format!("missing alias after `{path} AS`"),
                            ))
                        }
                    }
                }
                _ => path.to_string(),
            };

            fields.push(ProjectionField { path, alias });
        }

        if fields.is_empty() {
            return Err(Error::template_syntax(src, 0, "projection list is empty"));
        }

        Ok(ProjectionSpec { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| &field.alias[..])
    }

    /// Arguments of a `RETURN`/`LOAD` clause: the count of following tokens,
    /// then `path AS alias` for every field.
    pub fn clause_args(&self) -> Vec<String> {
        let mut args = vec![(self.fields.len() * 3).to_string()];
        for field in &self.fields {
            args.push(field.path.to_string());
            args.push("AS".to_string());
            args.push(field.alias.clone());
        }
        args
    }
}

impl fmt::Display for ProjectionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{} AS {}", field.path, field.alias)?;
        }
        Ok(())
    }
}

/// Splits on whitespace and commas, keeping bracketed path segments (which
/// may hold quoted names with spaces) intact.
fn tokenize(src: &str) -> Result<Vec<String>> {
    let mut tokens = vec![];
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote = None;
    let mut chars = src.char_indices();

    while let Some((offset, ch)) = chars.next() {
        match (quote, ch) {
            (Some(_), '\\') => {
                current.push(ch);
                if let Some((_, escaped)) = chars.next() {
                    current.push(escaped);
                }
            }
            (Some(q), ch) if ch == q => {
                quote = None;
                current.push(ch);
            }
            (Some(_), ch) => current.push(ch),
            (None, '"' | '\'') if depth > 0 => {
                quote = Some(ch);
                current.push(ch);
            }
            (None, '[') => {
                depth += 1;
                current.push(ch);
            }
            (None, ']') => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    Error::template_syntax(src, offset, "unbalanced `]`")
                })?;
                current.push(ch);
            }
            (None, ch) if depth == 0 && (ch.is_whitespace() || ch == ',') => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            (None, ch) => current.push(ch),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}
