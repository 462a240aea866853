//! Escaping of values substituted into query syntax.

/// Characters with a meaning in query syntax.
const RESERVED: &[char] = &[
    ',', '.', '<', '>', '{', '}', '[', ']', '"', '\'', ':', ';', '!', '@', '#', '$', '%', '^',
    '&', '*', '(', ')', '-', '+', '=', '~', '|', '/', '\\',
];

pub fn is_reserved(ch: char) -> bool {
    RESERVED.contains(&ch)
}

/// Escapes free text.
///
/// Reserved characters are backslash-escaped. Text with whitespace is
/// wrapped in a group so a preceding `@field:` modifier applies to every
/// term.
pub fn text(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    let grouped = value.trim().contains(char::is_whitespace);

    if grouped {
        out.push('(');
    }

    for ch in value.trim().chars() {
        if is_reserved(ch) {
            out.push('\\');
        }
        out.push(ch);
    }

    if grouped {
        out.push(')');
    }

    out
}

/// Escapes a single tag value. Whitespace is significant inside tags, so it
/// is escaped as well.
pub fn tag(value: &str) -> String {
    let mut out = String::with_capacity(value.len());

    for ch in value.chars() {
        if is_reserved(ch) || ch.is_whitespace() {
            out.push('\\');
        }
        out.push(ch);
    }

    out
}
