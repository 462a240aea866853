use super::{Path, PathSegment};
use crate::{Error, Result};

pub(super) struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(super) fn new(src: &'a str) -> Parser<'a> {
        Parser { src, pos: 0 }
    }

    pub(super) fn parse(mut self) -> Result<Path> {
        match self.next_char() {
            Some('$') => {}
            Some(_) => return Err(self.error("path must start with the root marker `$`")),
            None => return Err(self.error("path is empty")),
        }

        let mut segments = vec![];

        while let Some(ch) = self.next_char() {
            let segment = match ch {
                '.' => self.dot_segment()?,
                '[' => self.bracket_segment()?,
                ch => {
                    return Err(self.error(format!(
                        "unexpected character `{ch}` at byte {}",
                        self.pos - ch.len_utf8()
                    )))
                }
            };
            segments.push(segment);
        }

        Ok(Path { segments })
    }

    fn dot_segment(&mut self) -> Result<PathSegment> {
        match self.peek_char() {
            Some('*') => {
                self.consume(1);
                Ok(PathSegment::Wildcard)
            }
            Some('.') => Err(self.error("recursive descent `..` is not supported")),
            Some(ch) if member_ch(ch) => {
                let start = self.pos;
                while let Some(ch) = self.peek_char() {
                    if !member_ch(ch) {
                        break;
                    }
                    self.consume(ch.len_utf8());
                }
                Ok(PathSegment::Member(self.src[start..self.pos].to_string()))
            }
            Some(_) | None => Err(self.error(format!("empty member name at byte {}", self.pos))),
        }
    }

    fn bracket_segment(&mut self) -> Result<PathSegment> {
        let segment = match self.peek_char() {
            Some('*') => {
                self.consume(1);
                PathSegment::Wildcard
            }
            Some(quote @ ('"' | '\'')) => {
                self.consume(1);
                PathSegment::Member(self.quoted(quote)?)
            }
            Some(ch) if ch == '-' || ch.is_ascii_digit() => PathSegment::Index(self.index()?),
            Some('?') => return Err(self.error("filter expressions are not supported")),
            Some(ch) => {
                return Err(self.error(format!(
                    "unexpected character `{ch}` inside `[` at byte {}",
                    self.pos
                )))
            }
            None => return Err(self.error("unterminated `[`")),
        };

        match self.next_char() {
            Some(']') => Ok(segment),
            Some(_) => Err(self.error(format!("expected `]` at byte {}", self.pos - 1))),
            None => Err(self.error("unterminated `[`")),
        }
    }

    fn quoted(&mut self, quote: char) -> Result<String> {
        let mut name = String::new();

        loop {
            match self.next_char() {
                Some(ch) if ch == quote => break,
                Some('\\') => name.push(self.escape()?),
                Some(ch) => name.push(ch),
                None => return Err(self.error("unterminated quoted member name")),
            }
        }

        if name.is_empty() {
            return Err(self.error("empty member name"));
        }

        Ok(name)
    }

    /// Decodes one JSON string escape, the backslash already consumed.
    fn escape(&mut self) -> Result<char> {
        let ch = match self.next_char() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('b') => '\u{8}',
            Some('f') => '\u{c}',
            Some('u') => return self.unicode_escape(),
            Some(ch @ ('"' | '\'' | '\\' | '/')) => ch,
            Some(ch) => return Err(self.error(format!("invalid escape `\\{ch}`"))),
            None => return Err(self.error("unterminated quoted member name")),
        };
        Ok(ch)
    }

    fn unicode_escape(&mut self) -> Result<char> {
        let high = self.hex4()?;

        if !(0xD800..0xDC00).contains(&high) {
            return char::from_u32(high)
                .ok_or_else(|| self.error(format!("invalid unicode escape `\\u{high:04x}`")));
        }

        if self.src[self.pos..].starts_with("\\u") {
            self.consume(2);
            let low = self.hex4()?;
            if (0xDC00..0xE000).contains(&low) {
                let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                if let Some(ch) = char::from_u32(code) {
                    return Ok(ch);
                }
            }
        }

        Err(self.error(format!("unpaired surrogate `\\u{high:04x}`")))
    }

    fn hex4(&mut self) -> Result<u32> {
        let src = self.src;
        let digits = src.get(self.pos..self.pos + 4).unwrap_or("");

        if digits.len() != 4 || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(self.error(format!("invalid unicode escape at byte {}", self.pos)));
        }

        self.consume(4);
        u32::from_str_radix(digits, 16)
            .map_err(|_| self.error(format!("invalid unicode escape `{digits}`")))
    }

    fn index(&mut self) -> Result<i64> {
        let start = self.pos;
        if self.peek_char() == Some('-') {
            self.consume(1);
        }
        while matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit()) {
            self.consume(1);
        }

        self.src[start..self.pos]
            .parse()
            .map_err(|_| self.error(format!("invalid array index `{}`", &self.src[start..self.pos])))
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.consume(ch.len_utf8());
        Some(ch)
    }

    fn peek_char(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn consume(&mut self, n: usize) {
        self.pos += n;
    }

    fn error(&self, reason: impl Into<String>) -> Error {
        Error::invalid_path(self.src, reason)
    }
}

fn member_ch(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '-' | '$' | '@')
}

/// Returns `true` when `name` can be written in dot notation.
pub(super) fn is_plain_member(name: &str) -> bool {
    !name.is_empty() && name.chars().all(member_ch)
}
