#![forbid(unsafe_code)]

//! Text escaping for emitted markup.
//!
//! Two layers apply to rendered string literals, in order: string quoting
//! (backslash escaping of `\` and `"`, then wrapping in double quotes) and
//! HTML escaping of `<` and `>`. Backslashes are escaped before quotes so a
//! quote's own backslash is never re-escaped. `&` is deliberately left
//! alone; the emitted entities are the only ones the markup contains.

use std::borrow::Cow;

use memchr::memchr2;

/// Replace `<` and `>` with HTML entities, borrowing when the input
/// contains neither.
#[must_use]
pub fn escape_html(s: &str) -> Cow<'_, str> {
    let Some(first) = memchr2(b'<', b'>', s.as_bytes()) else {
        return Cow::Borrowed(s);
    };
    let mut out = String::with_capacity(s.len() + 8);
    out.push_str(&s[..first]);
    for c in s[first..].chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Undo [`escape_html`].
#[must_use]
pub fn unescape_html(s: &str) -> String {
    s.replace("&lt;", "<").replace("&gt;", ">")
}

/// Escape `\` and `"` (backslash first) and wrap in double quotes,
/// producing the quoted literal form of a string value.
#[must_use]
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Undo [`quote_string`]. Returns `None` if the input is not a quoted
/// literal produced by it.
#[must_use]
pub fn unquote_string(s: &str) -> Option<String> {
    let inner = s.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next()? {
                '\\' => out.push('\\'),
                '"' => out.push('"'),
                _ => return None,
            }
        } else if c == '"' {
            return None;
        } else {
            out.push(c);
        }
    }
    Some(out)
}
