#![forbid(unsafe_code)]

//! Collapsible HTML tree rendering for parsed JSON-like values.

pub mod tree;

pub use tree::{RegionId, RenderOptions, TreeView};
