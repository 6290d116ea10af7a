#![forbid(unsafe_code)]

//! jsonfold public facade crate.
//!
//! Re-exports the common types from the internal crates: the relaxed
//! parser and value model, the collapsible HTML tree view, and the
//! loading-overlay managers. Most users only need the [`prelude`].
//!
//! # Example
//!
//! ```
//! use jsonfold::prelude::*;
//!
//! let mut view = TreeView::parse(r#"{"ok": [1, 2]}"#, RenderOptions::default()).unwrap();
//! view.collapse_to_level(1);
//! let html = view.html();
//! assert!(html.contains("json-toggle"));
//! ```

// --- Core re-exports -------------------------------------------------------

pub use jfold_core::escape::{escape_html, quote_string, unquote_string};
pub use jfold_core::geometry::PxRect;
pub use jfold_core::parse::{MAX_DEPTH, ParseError, parse};
pub use jfold_core::value::{Value, ValueKind};

// --- Tree-view re-exports --------------------------------------------------

pub use jfold_html::tree::{
    COLLAPSED_GLYPH, EXPANDED_GLYPH, RegionId, RenderOptions, TreeView,
};

// --- Overlay re-exports ----------------------------------------------------

#[cfg(feature = "overlay")]
pub use jfold_overlay::{GlobalOverlay, OverlayPhase, ScopedOverlays};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{ParseError, PxRect, RegionId, RenderOptions, TreeView, Value, ValueKind, parse};

    #[cfg(feature = "overlay")]
    pub use crate::{GlobalOverlay, OverlayPhase, ScopedOverlays};
}
