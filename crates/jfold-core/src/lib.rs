#![forbid(unsafe_code)]

//! Core: value model, relaxed JSON parsing, text escaping, and pixel geometry.

pub mod escape;
pub mod geometry;
pub mod parse;
pub mod value;

pub use escape::{escape_html, quote_string, unquote_string};
pub use geometry::PxRect;
pub use parse::{ParseError, parse};
pub use value::{Value, ValueKind};
