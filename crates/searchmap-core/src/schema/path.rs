mod parse;

use crate::Result;

use serde_json::Value as Json;
use std::{fmt, str::FromStr};

/// A parsed nested-document locator such as `$.tag[0]` or `$.tag[*]`.
///
/// The same AST backs field mappings, `RETURN` projections and `LOAD`
/// clauses, and it is evaluated locally against JSON bodies when a reply
/// carries the whole document instead of the projected field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<PathSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object member by name: `.name` or `["name"]`
    Member(String),

    /// Array element by position: `[n]`. Negative positions count from the
    /// end of the array.
    Index(i64),

    /// Every element of an array or every member of an object: `[*]` / `.*`
    Wildcard,
}

impl Path {
    /// Parses a locator. Fails with an invalid path error on malformed input.
    pub fn parse(src: &str) -> Result<Path> {
        parse::Parser::new(src).parse()
    }

    /// The document root, `$`.
    pub fn root() -> Path {
        Path { segments: vec![] }
    }

    pub fn member(mut self, name: impl Into<String>) -> Path {
        self.segments.push(PathSegment::Member(name.into()));
        self
    }

    pub fn index(mut self, index: i64) -> Path {
        self.segments.push(PathSegment::Index(index));
        self
    }

    pub fn wildcard(mut self) -> Path {
        self.segments.push(PathSegment::Wildcard);
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the member name when the path is exactly `$.name`.
    pub fn as_single_member(&self) -> Option<&str> {
        match &self.segments[..] {
            [PathSegment::Member(name)] => Some(name),
            _ => None,
        }
    }

    /// Name of the last member segment, if any.
    pub fn last_member(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(|segment| match segment {
            PathSegment::Member(name) => Some(&name[..]),
            _ => None,
        })
    }

    pub fn has_wildcard(&self) -> bool {
        self.segments.contains(&PathSegment::Wildcard)
    }

    /// Returns every value in `doc` the path addresses, in document order.
    ///
    /// Missing members and out-of-range positions simply contribute nothing.
    pub fn select<'a>(&self, doc: &'a Json) -> Vec<&'a Json> {
        let mut current = vec![doc];

        for segment in &self.segments {
            let mut next = vec![];

            for value in current {
                match (segment, value) {
                    (PathSegment::Member(name), Json::Object(map)) => {
                        next.extend(map.get(name));
                    }
                    (PathSegment::Index(index), Json::Array(items)) => {
                        next.extend(resolve_index(*index, items.len()).map(|i| &items[i]));
                    }
                    (PathSegment::Wildcard, Json::Array(items)) => next.extend(items),
                    (PathSegment::Wildcard, Json::Object(map)) => next.extend(map.values()),
                    _ => {}
                }
            }

            if next.is_empty() {
                return next;
            }

            current = next;
        }

        current
    }

    /// Returns the first value the path addresses.
    pub fn select_first<'a>(&self, doc: &'a Json) -> Option<&'a Json> {
        self.select(doc).into_iter().next()
    }
}

fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let resolved = if index < 0 { len + index } else { index };

    if (0..len).contains(&resolved) {
        usize::try_from(resolved).ok()
    } else {
        None
    }
}

impl FromStr for Path {
    type Err = crate::Error;

    fn from_str(src: &str) -> Result<Path> {
        Path::parse(src)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;

        for segment in &self.segments {
            match segment {
                PathSegment::Member(name) if parse::is_plain_member(name) => {
                    write!(f, ".{name}")?
                }
                PathSegment::Member(name) => {
                    let quoted = Json::String(name.clone());
                    write!(f, "[{quoted}]")?
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Wildcard => f.write_str("[*]")?,
            }
        }

        Ok(())
    }
}
