//! Type syntax
//!
//! Snapshots carry types as the text written in source (`Task<string>`,
//! `List<Order>?`, `int[]`). [`TypeSyntax`] is the small structural parse of
//! that text: a (possibly qualified) name, generic arguments and a suffix of
//! nullable/array markers. Anything outside that grammar (tuples, pointers,
//! function pointers) does not parse and callers fall back to the literal text.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static TYPE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(global::)?@?[A-Za-z_][A-Za-z0-9_]*(\.@?[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("type name pattern is valid")
});

/// Parsed type text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSyntax {
    /// Name as written, possibly qualified (`Task`, `System.Threading.Tasks.Task`)
    pub name: String,

    /// Generic arguments
    pub arguments: Vec<TypeSyntax>,

    /// Trailing `?` / `[]` markers, normalized without whitespace
    pub suffix: String,
}

impl TypeSyntax {
    /// Parse type text, returning `None` when it is not a plain named type
    pub fn parse(text: &str) -> Option<Self> {
        let mut cursor = Cursor { text, pos: 0 };
        let ty = cursor.parse_type()?;
        cursor.skip_ws();
        if cursor.pos == text.len() {
            Some(ty)
        } else {
            None
        }
    }

    /// Name without a `global::` alias prefix
    pub fn base_name(&self) -> &str {
        self.name.strip_prefix("global::").unwrap_or(&self.name)
    }

    /// Last segment of the name
    pub fn simple_name(&self) -> &str {
        let base = self.base_name();
        base.rsplit('.').next().unwrap_or(base)
    }

    /// Whether the type carries generic arguments
    pub fn is_generic(&self) -> bool {
        !self.arguments.is_empty()
    }
}

impl fmt::Display for TypeSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            f.write_str("<")?;
            for (i, argument) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{argument}")?;
            }
            f.write_str(">")?;
        }
        f.write_str(&self.suffix)
    }
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_type(&mut self) -> Option<TypeSyntax> {
        self.skip_ws();
        let start = self.pos;
        while self.peek().is_some_and(|b| !is_delimiter(b)) {
            self.pos += 1;
        }
        let name = &self.text[start..self.pos];
        if !TYPE_NAME.is_match(name) {
            return None;
        }

        self.skip_ws();
        let mut arguments = Vec::new();
        if self.eat(b'<') {
            loop {
                arguments.push(self.parse_type()?);
                self.skip_ws();
                if self.eat(b',') {
                    continue;
                }
                if self.eat(b'>') {
                    break;
                }
                return None;
            }
        }

        let mut suffix = String::new();
        loop {
            self.skip_ws();
            if self.eat(b'?') {
                suffix.push('?');
            } else if self.eat(b'[') {
                suffix.push('[');
                loop {
                    self.skip_ws();
                    if self.eat(b',') {
                        suffix.push(',');
                    } else if self.eat(b']') {
                        suffix.push(']');
                        break;
                    } else {
                        return None;
                    }
                }
            } else {
                break;
            }
        }

        Some(TypeSyntax {
            name: name.to_string(),
            arguments,
            suffix,
        })
    }
}

fn is_delimiter(b: u8) -> bool {
    matches!(b, b'<' | b'>' | b',' | b'[' | b']' | b'?' | b'(' | b')') || b.is_ascii_whitespace()
}
