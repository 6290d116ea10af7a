#![forbid(unsafe_code)]

//! Global reference-counted loading overlay.
//!
//! Overlapping operations share one overlay: each `show` increments a
//! count, each `hide` decrements it, and the overlay stays up until the
//! count returns to zero. A fresh activation does not appear immediately;
//! it arms a deadline and only becomes visible once a `tick` observes the
//! deadline passing. Work that finishes inside the delay window therefore
//! never flashes an overlay at all.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use jfold_overlay::GlobalOverlay;
//!
//! let mut overlay = GlobalOverlay::new();
//! let start = Instant::now();
//! overlay.show(Some("Saving..."), start);
//! assert!(!overlay.is_visible());
//! overlay.tick(start + Duration::from_millis(150));
//! assert!(overlay.is_visible());
//! overlay.hide();
//! assert!(!overlay.is_visible());
//! ```

use std::time::{Duration, Instant};

use jfold_core::escape_html;

/// Lifecycle of the global overlay.
///
/// Activations move `Idle` → `Pending` → `Visible`; a `hide` that drains
/// the count returns to `Idle` from either active phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayPhase {
    /// No outstanding activations.
    #[default]
    Idle,
    /// Activations outstanding, delay deadline not yet reached.
    Pending,
    /// Overlay is showing.
    Visible,
}

/// Reference-counted overlay with a debounced appearance.
#[derive(Debug, Clone)]
pub struct GlobalOverlay {
    phase: OverlayPhase,
    count: u32,
    deadline: Option<Instant>,
    delay: Duration,
    message: String,
}

impl Default for GlobalOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalOverlay {
    /// Delay between the first activation and the overlay appearing.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);
    /// Message shown when no activation supplies one.
    pub const DEFAULT_MESSAGE: &'static str = "Loading...";

    /// Create an idle overlay with the default delay and message.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: OverlayPhase::Idle,
            count: 0,
            deadline: None,
            delay: Self::DEFAULT_DELAY,
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }

    /// Set the debounce delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the fallback message used when `show` passes `None`.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// Number of outstanding activations.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether the overlay is currently showing.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.phase == OverlayPhase::Visible
    }

    /// The message the overlay displays or will display.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Register an activation at `now`. The first activation arms the
    /// delay deadline; later ones only bump the count. A supplied message
    /// replaces the current one, including while already visible.
    pub fn show(&mut self, message: Option<&str>, now: Instant) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("overlay_show", count = self.count).entered();

        self.count = self.count.saturating_add(1);
        if let Some(message) = message {
            self.message = message.to_string();
        }
        if self.phase == OverlayPhase::Idle {
            self.phase = OverlayPhase::Pending;
            self.deadline = Some(now + self.delay);
        }
    }

    /// Advance the debounce clock. Returns `true` when this tick made the
    /// overlay visible. Ticks while idle or already visible are no-ops.
    pub fn tick(&mut self, now: Instant) -> bool {
        match (self.phase, self.deadline) {
            (OverlayPhase::Pending, Some(deadline)) if now >= deadline => {
                self.phase = OverlayPhase::Visible;
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Release one activation. When the count drains to zero the overlay
    /// deactivates: a pending deadline is cancelled, a visible overlay is
    /// dismissed. Returns `true` when this call deactivated the overlay.
    /// Unbalanced extra calls are tolerated no-ops.
    pub fn hide(&mut self) -> bool {
        if self.count == 0 {
            return false;
        }
        self.count -= 1;
        if self.count > 0 {
            return false;
        }
        let was_active = self.phase != OverlayPhase::Idle;
        self.phase = OverlayPhase::Idle;
        self.deadline = None;
        was_active
    }

    /// Overlay markup, or `None` while not visible. The message is
    /// HTML-escaped.
    #[must_use]
    pub fn html(&self) -> Option<String> {
        if !self.is_visible() {
            return None;
        }
        Some(format!(
            "<div class=\"loading-overlay\"><span class=\"loading-message\">{}</span></div>",
            escape_html(&self.message)
        ))
    }
}
