#![forbid(unsafe_code)]

//! Loading overlays: a global reference-counted overlay with a debounced
//! show, and scoped per-container overlays with replace semantics.
//!
//! Neither overlay owns a clock or a timer thread. Callers pass
//! [`std::time::Instant`]s into [`GlobalOverlay::show`] and
//! [`GlobalOverlay::tick`], which keeps the debounce deterministic and
//! testable.

pub mod global;
pub mod scoped;

pub use global::{GlobalOverlay, OverlayPhase};
pub use scoped::ScopedOverlays;
