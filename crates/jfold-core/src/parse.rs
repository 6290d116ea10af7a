#![forbid(unsafe_code)]

//! Relaxed literal parser.
//!
//! An explicit recursive-descent parser for a superset of JSON: in addition
//! to the standard literals it accepts `undefined`, bare identifier object
//! keys, `new Date(<millis>)` date literals, and `/pattern/flags` regular
//! expression literals. Nothing is ever evaluated; input that is not one of
//! these literal forms is a [`ParseError`].
//!
//! Empty (or all-whitespace) input parses as the empty string literal `""`,
//! so a blank input area renders as `""` rather than failing.
//!
//! # Example
//!
//! ```
//! use jfold_core::{Value, parse};
//!
//! let value = parse("[1, null, \"two\"]").unwrap();
//! assert_eq!(value.as_array().unwrap().len(), 3);
//! assert_eq!(parse(""), Ok(Value::String(String::new())));
//! assert!(parse("{a:}").is_err());
//! ```

use crate::value::Value;

/// Maximum container nesting depth accepted by the parser.
pub const MAX_DEPTH: usize = 128;

/// Parse failure, with the byte offset where parsing stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input ended in the middle of a literal.
    UnexpectedEnd,
    /// A character that cannot start or continue the expected production.
    Unexpected { found: char, offset: usize },
    /// Malformed numeric literal.
    InvalidNumber { offset: usize },
    /// Malformed string escape sequence.
    InvalidEscape { offset: usize },
    /// The same key appeared twice in one object.
    DuplicateKey { key: String, offset: usize },
    /// Non-whitespace input remained after the value.
    TrailingContent { offset: usize },
    /// Containers nested deeper than [`MAX_DEPTH`].
    DepthLimit { offset: usize },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedEnd => write!(f, "unexpected end of input"),
            Self::Unexpected { found, offset } => {
                write!(f, "unexpected character `{found}` at byte {offset}")
            }
            Self::InvalidNumber { offset } => write!(f, "invalid number at byte {offset}"),
            Self::InvalidEscape { offset } => {
                write!(f, "invalid escape sequence at byte {offset}")
            }
            Self::DuplicateKey { key, offset } => {
                write!(f, "duplicate object key `{key}` at byte {offset}")
            }
            Self::TrailingContent { offset } => {
                write!(f, "trailing content at byte {offset}")
            }
            Self::DepthLimit { offset } => {
                write!(f, "nesting deeper than {MAX_DEPTH} at byte {offset}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a text blob as a single relaxed literal value.
pub fn parse(text: &str) -> Result<Value, ParseError> {
    let mut p = Parser::new(text);
    p.skip_ws();
    if p.at_end() {
        // Blank input defaults to the two-character literal `""`.
        return Ok(Value::String(String::new()));
    }
    let value = p.value(0)?;
    p.skip_ws();
    if !p.at_end() {
        return Err(ParseError::TrailingContent { offset: p.pos });
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while let Some(b) = self.peek() {
            if b == b' ' || b == b'\t' || b == b'\r' || b == b'\n' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// The character at the current position, for error reporting.
    fn current_char(&self) -> Result<char, ParseError> {
        self.src[self.pos..]
            .chars()
            .next()
            .ok_or(ParseError::UnexpectedEnd)
    }

    fn unexpected(&self) -> ParseError {
        match self.current_char() {
            Ok(found) => ParseError::Unexpected {
                found,
                offset: self.pos,
            },
            Err(e) => e,
        }
    }

    fn expect(&mut self, b: u8) -> Result<(), ParseError> {
        if self.peek() == Some(b) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn value(&mut self, depth: usize) -> Result<Value, ParseError> {
        if depth >= MAX_DEPTH {
            return Err(ParseError::DepthLimit { offset: self.pos });
        }
        match self.peek() {
            None => Err(ParseError::UnexpectedEnd),
            Some(b'{') => self.object(depth),
            Some(b'[') => self.array(depth),
            Some(b'"') => self.string().map(Value::String),
            Some(b'/') => self.regexp(),
            Some(b'-') | Some(b'0'..=b'9') => self.number(),
            Some(b) if is_ident_start(b) => self.keyword(),
            Some(_) => Err(self.unexpected()),
        }
    }

    fn object(&mut self, depth: usize) -> Result<Value, ParseError> {
        self.expect(b'{')?;
        self.skip_ws();
        let mut members: Vec<(String, Value)> = Vec::new();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(Value::Object(members));
        }
        loop {
            self.skip_ws();
            let key_offset = self.pos;
            let key = self.key()?;
            if members.iter().any(|(k, _)| *k == key) {
                return Err(ParseError::DuplicateKey {
                    key,
                    offset: key_offset,
                });
            }
            self.skip_ws();
            self.expect(b':')?;
            self.skip_ws();
            let value = self.value(depth + 1)?;
            members.push((key, value));
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(Value::Object(members));
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn array(&mut self, depth: usize) -> Result<Value, ParseError> {
        self.expect(b'[')?;
        self.skip_ws();
        let mut items = Vec::new();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(Value::Array(items));
        }
        loop {
            self.skip_ws();
            items.push(self.value(depth + 1)?);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    return Ok(Value::Array(items));
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    /// An object key: a quoted string or a bare identifier.
    fn key(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Some(b'"') => self.string(),
            Some(b) if is_ident_start(b) => Ok(self.ident().to_string()),
            _ => Err(self.unexpected()),
        }
    }

    /// A double-quoted string with JSON escape sequences, unescaped.
    fn string(&mut self) -> Result<String, ParseError> {
        self.expect(b'"')?;
        let mut out = String::new();
        loop {
            let rest = &self.src[self.pos..];
            let Some(ch) = rest.chars().next() else {
                return Err(ParseError::UnexpectedEnd);
            };
            match ch {
                '"' => {
                    self.pos += 1;
                    return Ok(out);
                }
                '\\' => {
                    let escape_offset = self.pos;
                    self.pos += 1;
                    let Some(esc) = self.src[self.pos..].chars().next() else {
                        return Err(ParseError::UnexpectedEnd);
                    };
                    self.pos += esc.len_utf8();
                    match esc {
                        '"' => out.push('"'),
                        '\\' => out.push('\\'),
                        '/' => out.push('/'),
                        'b' => out.push('\u{0008}'),
                        'f' => out.push('\u{000C}'),
                        'n' => out.push('\n'),
                        'r' => out.push('\r'),
                        't' => out.push('\t'),
                        'u' => {
                            let unit = self.hex4(escape_offset)?;
                            if (0xD800..0xDC00).contains(&unit) {
                                // High surrogate: a low surrogate escape must follow.
                                if self.peek() != Some(b'\\') {
                                    return Err(ParseError::InvalidEscape {
                                        offset: escape_offset,
                                    });
                                }
                                self.pos += 1;
                                if self.peek() != Some(b'u') {
                                    return Err(ParseError::InvalidEscape {
                                        offset: escape_offset,
                                    });
                                }
                                self.pos += 1;
                                let low = self.hex4(escape_offset)?;
                                if !(0xDC00..0xE000).contains(&low) {
                                    return Err(ParseError::InvalidEscape {
                                        offset: escape_offset,
                                    });
                                }
                                let c = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                                match char::from_u32(c) {
                                    Some(c) => out.push(c),
                                    None => {
                                        return Err(ParseError::InvalidEscape {
                                            offset: escape_offset,
                                        });
                                    }
                                }
                            } else {
                                match char::from_u32(unit) {
                                    Some(c) => out.push(c),
                                    None => {
                                        return Err(ParseError::InvalidEscape {
                                            offset: escape_offset,
                                        });
                                    }
                                }
                            }
                        }
                        _ => {
                            return Err(ParseError::InvalidEscape {
                                offset: escape_offset,
                            });
                        }
                    }
                }
                c => {
                    self.pos += c.len_utf8();
                    out.push(c);
                }
            }
        }
    }

    /// Four hex digits of a `\u` escape.
    fn hex4(&mut self, escape_offset: usize) -> Result<u32, ParseError> {
        let mut unit: u32 = 0;
        for _ in 0..4 {
            let Some(b) = self.peek() else {
                return Err(ParseError::UnexpectedEnd);
            };
            let digit = match b {
                b'0'..=b'9' => u32::from(b - b'0'),
                b'a'..=b'f' => u32::from(b - b'a') + 10,
                b'A'..=b'F' => u32::from(b - b'A') + 10,
                _ => {
                    return Err(ParseError::InvalidEscape {
                        offset: escape_offset,
                    });
                }
            };
            unit = unit * 16 + digit;
            self.pos += 1;
        }
        Ok(unit)
    }

    /// A JSON numeric literal.
    fn number(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        // Integer part: `0` alone, or a nonzero digit followed by digits.
        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => {
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
            }
            _ => return Err(ParseError::InvalidNumber { offset: start }),
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(ParseError::InvalidNumber { offset: start });
            }
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
        }
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.pos += 1;
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(ParseError::InvalidNumber { offset: start });
            }
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
        }
        let text = &self.src[start..self.pos];
        text.parse::<f64>()
            .map(Value::Number)
            .map_err(|_| ParseError::InvalidNumber { offset: start })
    }

    /// A bare identifier keyword: `null`, `true`, `false`, `undefined`, or
    /// the start of a `new Date(...)` literal.
    fn keyword(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        let ident = self.ident();
        match ident {
            "null" | "undefined" => Ok(Value::Null),
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "new" => self.date(),
            _ => {
                self.pos = start;
                Err(self.unexpected())
            }
        }
    }

    fn ident(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if is_ident_continue(b) {
                self.pos += 1;
            } else {
                break;
            }
        }
        &self.src[start..self.pos]
    }

    /// The remainder of a `new Date(<millis>)` literal; `new` is already
    /// consumed.
    fn date(&mut self) -> Result<Value, ParseError> {
        self.skip_ws();
        let ctor_start = self.pos;
        if self.ident() != "Date" {
            self.pos = ctor_start;
            return Err(self.unexpected());
        }
        self.skip_ws();
        self.expect(b'(')?;
        self.skip_ws();
        let num_start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        if !matches!(self.peek(), Some(b'0'..=b'9')) {
            return Err(self.unexpected());
        }
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        let millis: i64 = self.src[num_start..self.pos]
            .parse()
            .map_err(|_| ParseError::InvalidNumber { offset: num_start })?;
        self.skip_ws();
        self.expect(b')')?;
        Ok(Value::Date(millis))
    }

    /// A `/pattern/flags` regular expression literal. The pattern ends at
    /// the first unescaped `/` outside a character class.
    fn regexp(&mut self) -> Result<Value, ParseError> {
        self.expect(b'/')?;
        let mut pattern = String::new();
        let mut in_class = false;
        loop {
            let rest = &self.src[self.pos..];
            let Some(ch) = rest.chars().next() else {
                return Err(ParseError::UnexpectedEnd);
            };
            match ch {
                '/' if !in_class => {
                    self.pos += 1;
                    break;
                }
                '\\' => {
                    pattern.push('\\');
                    self.pos += 1;
                    let Some(next) = self.src[self.pos..].chars().next() else {
                        return Err(ParseError::UnexpectedEnd);
                    };
                    pattern.push(next);
                    self.pos += next.len_utf8();
                }
                '[' => {
                    in_class = true;
                    pattern.push('[');
                    self.pos += 1;
                }
                ']' => {
                    in_class = false;
                    pattern.push(']');
                    self.pos += 1;
                }
                '\n' => return Err(self.unexpected()),
                c => {
                    pattern.push(c);
                    self.pos += c.len_utf8();
                }
            }
        }
        let mut flags = String::new();
        while let Some(b) = self.peek() {
            if b.is_ascii_lowercase() {
                flags.push(b as char);
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok(Value::Regexp { pattern, flags })
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}
