//! Parsing and evaluation of filter queries.
//!
//! Supports the subset of the query language the crate generates: `*`,
//! bare terms, `@field:term`, `@field:(terms…)`, `@field:{a|b}`,
//! `@field:[min max]`, grouping, negation with `-` and unions with `|`.

use super::Document;

use searchmap_core::{
    schema::{FieldMapping, FieldType, IndexDefinition},
    Error, Result,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Filter {
    All,
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),

    /// Every term must occur in the field, or in any text field when no
    /// field is named
    Terms {
        field: Option<String>,
        terms: Vec<String>,
    },

    /// Any of the tags must be set
    Tags { field: String, tags: Vec<String> },

    Range {
        field: String,
        min: Bound,
        max: Bound,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bound {
    value: f64,
    exclusive: bool,
}

impl Filter {
    pub(crate) fn parse(src: &str, definition: &IndexDefinition) -> Result<Filter> {
        let mut parser = Parser {
            src,
            chars: src.char_indices().collect(),
            pos: 0,
            definition,
        };

        let filter = parser.union()?;
        parser.skip_ws();

        match parser.peek() {
            None => Ok(filter),
            Some(_) => Err(parser.syntax_error()),
        }
    }

    pub(crate) fn matches(&self, doc: &Document, definition: &IndexDefinition) -> bool {
        match self {
            Filter::All => true,
            Filter::And(filters) => filters.iter().all(|f| f.matches(doc, definition)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(doc, definition)),
            Filter::Not(filter) => !filter.matches(doc, definition),
            Filter::Terms { field, terms } => {
                let fields: Vec<&FieldMapping> = match field {
                    Some(alias) => definition.field(alias).into_iter().collect(),
                    None => definition.fields.iter().filter(|f| f.ty.is_text()).collect(),
                };

                let words: Vec<String> = fields
                    .into_iter()
                    .flat_map(|field| doc.text_values(definition, field))
                    .flat_map(|text| tokenize(&text))
                    .collect();

                terms
                    .iter()
                    .flat_map(|term| tokenize(term))
                    .all(|term| words.contains(&term))
            }
            Filter::Tags { field, tags } => {
                let Some(mapping) = definition.field(field) else {
                    return false;
                };

                let separator = match mapping.ty {
                    FieldType::Tag { separator } => separator.unwrap_or(','),
                    _ => ',',
                };

                doc.text_values(definition, mapping)
                    .iter()
                    .flat_map(|value| value.split(separator))
                    .map(|value| value.trim().to_lowercase())
                    .any(|value| tags.contains(&value))
            }
            Filter::Range { field, min, max } => {
                let Some(mapping) = definition.field(field) else {
                    return false;
                };

                doc.text_values(definition, mapping)
                    .iter()
                    .filter_map(|value| value.trim().parse::<f64>().ok())
                    .any(|value| min.below(value) && max.above(value))
            }
        }
    }
}

impl Bound {
    fn below(self, value: f64) -> bool {
        if self.exclusive {
            self.value < value
        } else {
            self.value <= value
        }
    }

    fn above(self, value: f64) -> bool {
        if self.exclusive {
            value < self.value
        } else {
            value <= self.value
        }
    }
}

/// Lowercased words of a text value, split on anything that is not
/// alphanumeric.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|ch: char| !ch.is_alphanumeric() && ch != '_')
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

struct Parser<'a> {
    src: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
    definition: &'a IndexDefinition,
}

/// Characters that end a bare term.
const TERM_END: &[char] = &['(', ')', '|', '{', '}', '[', ']', '@', ':', '"'];

impl Parser<'_> {
    fn union(&mut self) -> Result<Filter> {
        let mut alternatives = vec![self.intersection()?];

        while self.eat('|') {
            alternatives.push(self.intersection()?);
        }

        Ok(if alternatives.len() == 1 {
            alternatives.remove(0)
        } else {
            Filter::Or(alternatives)
        })
    }

    fn intersection(&mut self) -> Result<Filter> {
        let mut parts = vec![];

        loop {
            self.skip_ws();
            match self.peek() {
                None | Some(')') | Some('|') => break,
                _ => parts.push(self.unary()?),
            }
        }

        match parts.len() {
            0 => Err(self.syntax_error()),
            1 => Ok(parts.remove(0)),
            _ => Ok(Filter::And(parts)),
        }
    }

    fn unary(&mut self) -> Result<Filter> {
        if self.eat('-') {
            return Ok(Filter::Not(Box::new(self.unary()?)));
        }

        match self.peek() {
            Some('(') => {
                self.pos += 1;
                let inner = self.union()?;
                self.expect(')')?;
                Ok(inner)
            }
            Some('*') => {
                self.pos += 1;
                Ok(Filter::All)
            }
            Some('@') => {
                self.pos += 1;
                self.field_expr()
            }
            _ => Ok(Filter::Terms {
                field: None,
                terms: vec![self.term()?],
            }),
        }
    }

    fn field_expr(&mut self) -> Result<Filter> {
        let start = self.offset();
        let mut name = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                name.push(ch);
                self.pos += 1;
            } else {
                break;
            }
        }

        if name.is_empty() {
            return Err(self.syntax_error());
        }

        let mapping = self
            .definition
            .field(&name)
            .ok_or_else(|| Error::backend(format!("Unknown field `{name}` at offset {start}")))?;

        self.expect(':')?;
        self.skip_ws();

        match (&mapping.ty, self.peek()) {
            (FieldType::Tag { .. }, Some('{')) => {
                self.pos += 1;
                let tags = self.tags()?;
                Ok(Filter::Tags { field: name, tags })
            }
            (FieldType::Numeric, Some('[')) => {
                self.pos += 1;
                let min = self.bound()?;
                let max = self.bound()?;
                self.skip_ws();
                self.expect(']')?;
                Ok(Filter::Range {
                    field: name,
                    min,
                    max,
                })
            }
            (FieldType::Text { .. }, Some('(')) => {
                self.pos += 1;
                let mut terms = vec![];
                loop {
                    self.skip_ws();
                    if self.eat(')') {
                        break;
                    }
                    terms.push(self.term()?);
                }
                if terms.is_empty() {
                    return Err(self.syntax_error());
                }
                Ok(Filter::Terms {
                    field: Some(name),
                    terms,
                })
            }
            (FieldType::Text { .. }, _) => Ok(Filter::Terms {
                field: Some(name),
                terms: vec![self.term()?],
            }),
            _ => Err(self.syntax_error()),
        }
    }

    /// Tag values up to the closing `}`, split on unescaped `|`.
    fn tags(&mut self) -> Result<Vec<String>> {
        let mut tags = vec![];
        let mut current = String::new();

        loop {
            match self.bump() {
                None => return Err(self.syntax_error()),
                Some('\\') => match self.bump() {
                    Some(ch) => current.push(ch),
                    None => return Err(self.syntax_error()),
                },
                Some(ch @ ('|' | '}')) => {
                    let tag = current.trim().to_lowercase();
                    if tag.is_empty() {
                        return Err(self.syntax_error());
                    }
                    tags.push(tag);
                    current.clear();

                    if ch == '}' {
                        return Ok(tags);
                    }
                }
                Some(ch) => current.push(ch),
            }
        }
    }

    fn bound(&mut self) -> Result<Bound> {
        self.skip_ws();
        let exclusive = self.eat('(');
        let start = self.pos;

        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || ch == ']' {
                break;
            }
            self.pos += 1;
        }

        let text: String = self.chars[start..self.pos].iter().map(|(_, ch)| ch).collect();

        let value = match text.as_str() {
            "inf" | "+inf" => f64::INFINITY,
            "-inf" => f64::NEG_INFINITY,
            text => text.parse().map_err(|_| self.syntax_error_at(start))?,
        };

        Ok(Bound { value, exclusive })
    }

    fn term(&mut self) -> Result<String> {
        let start = self.pos;
        let mut term = String::new();

        while let Some(ch) = self.peek() {
            if ch == '\\' {
                self.pos += 1;
                match self.bump() {
                    Some(ch) => term.push(ch),
                    None => return Err(self.syntax_error()),
                }
            } else if ch.is_whitespace() || TERM_END.contains(&ch) {
                break;
            } else {
                term.push(ch);
                self.pos += 1;
            }
        }

        if term.is_empty() {
            return Err(self.syntax_error_at(start));
        }

        Ok(term)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, ch)| ch)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.syntax_error())
        }
    }

    fn offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map(|&(offset, _)| offset)
            .unwrap_or(self.src.len())
    }

    fn syntax_error(&self) -> Error {
        self.syntax_error_at(self.pos)
    }

    fn syntax_error_at(&self, pos: usize) -> Error {
        let offset = self
            .chars
            .get(pos)
            .map(|&(offset, _)| offset)
            .unwrap_or(self.src.len());

        let near: String = self.src[offset..].chars().take(10).collect();
        Error::backend(format!("Syntax error at offset {offset} near `{near}`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use searchmap_core::schema::SourceKind;

    fn definition() -> IndexDefinition {
        IndexDefinition::build(
            "idx",
            SourceKind::Json,
            [
                FieldMapping::text("$.title", "title").unwrap(),
                FieldMapping::tag("$.tag[*]", "tag").unwrap(),
                FieldMapping::numeric("$.views", "views").unwrap(),
            ],
        )
        .unwrap()
    }

    fn doc() -> Document {
        Document::Json(serde_json::json!({
            "title": "hello world",
            "tag": ["news", "article"],
            "views": 10,
        }))
    }

    fn matches(query: &str) -> bool {
        let definition = definition();
        Filter::parse(query, &definition)
            .unwrap()
            .matches(&doc(), &definition)
    }

    #[test]
    fn evaluates_generated_queries() {
        assert!(matches("*"));
        assert!(matches("@title:hello @tag:{news}"));
        assert!(matches("@title:(hello world)"));
        assert!(matches("@tag:{sports|article}"));
        assert!(matches("@views:[10 +inf]"));
        assert!(matches("hello -@tag:{sports}"));
        assert!(matches("@title:goodbye | @tag:{news}"));

        assert!(!matches("@title:goodbye"));
        assert!(!matches("@tag:{sports}"));
        assert!(!matches("@views:[(10 20]"));
        assert!(!matches("-(@title:hello)"));
    }

    #[test]
    fn rejects_malformed_queries() {
        let definition = definition();

        for query in [
            "",
            "@title:(hello",
            "@tag:{}",
            "@tag:{news",
            "@views:[1]",
            "@title",
            "@title:hello)",
            "@tag:news",
        ] {
            let err = Filter::parse(query, &definition).unwrap_err();
            assert!(err.is_backend(), "{query}: {err}");
        }
    }

    #[test]
    fn unknown_field() {
        let err = Filter::parse("@body:hello", &definition()).unwrap_err();
        assert_eq!(err.to_string(), "backend error: Unknown field `body` at offset 1");
    }
}
