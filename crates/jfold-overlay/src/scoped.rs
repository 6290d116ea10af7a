#![forbid(unsafe_code)]

//! Per-container loading overlays.
//!
//! Unlike the global overlay, scoped overlays are keyed by a container id
//! and appear immediately. Showing an overlay for a container that already
//! has one replaces it wholesale, so repeated `show` calls never stack.
//! The image-only variant positions a bare spinner image centered within
//! the container's pixel bounds, recomputing the offsets on every call so
//! a resized container re-centers on the next show.

use jfold_core::escape_html;
use jfold_core::geometry::PxRect;
use rustc_hash::FxHashMap;

/// Overlays keyed by container id.
#[derive(Debug, Clone)]
pub struct ScopedOverlays {
    boxed: FxHashMap<String, String>,
    images: FxHashMap<String, String>,
    image: String,
    image_width: u32,
    image_height: u32,
}

impl Default for ScopedOverlays {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopedOverlays {
    /// Spinner image used by both overlay variants.
    pub const DEFAULT_IMAGE: &'static str = "loading.gif";
    /// Spinner size assumed for centering, in pixels.
    pub const DEFAULT_IMAGE_SIZE: (u32, u32) = (32, 32);
    /// Message shown when `show` passes `None`.
    pub const DEFAULT_MESSAGE: &'static str = "Loading...";

    /// Create an empty overlay set with the default spinner image.
    #[must_use]
    pub fn new() -> Self {
        Self {
            boxed: FxHashMap::default(),
            images: FxHashMap::default(),
            image: Self::DEFAULT_IMAGE.to_string(),
            image_width: Self::DEFAULT_IMAGE_SIZE.0,
            image_height: Self::DEFAULT_IMAGE_SIZE.1,
        }
    }

    /// Set the spinner image path.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the spinner size used for centering.
    #[must_use]
    pub fn with_image_size(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Show a boxed overlay (spinner plus message) in `container`,
    /// replacing any overlay already shown there. `image` and `message`
    /// override the defaults for this call only. Returns the markup.
    pub fn show(&mut self, container: &str, image: Option<&str>, message: Option<&str>) -> &str {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("scoped_show", container).entered();

        let image = image.unwrap_or(&self.image);
        let message = message.unwrap_or(Self::DEFAULT_MESSAGE);
        let html = format!(
            "<div class=\"loading-box\"><img src=\"{}\" alt=\"\"> \
             <span class=\"loading-message\">{}</span></div>",
            escape_html(image),
            escape_html(message),
        );
        self.boxed.insert(container.to_string(), html);
        &self.boxed[container]
    }

    /// Remove `container`'s boxed overlay. Returns `false` when none was
    /// shown; hiding twice is a tolerated no-op.
    pub fn hide(&mut self, container: &str) -> bool {
        self.boxed.remove(container).is_some()
    }

    /// Show a bare spinner image centered within `bounds`, replacing any
    /// previous one for `container`. Centering is recomputed on every
    /// call from the bounds passed in, so a moved or resized container
    /// re-centers on its next show. Returns the markup.
    pub fn show_image_only(
        &mut self,
        container: &str,
        bounds: PxRect,
        image: Option<&str>,
    ) -> &str {
        let image = image.unwrap_or(&self.image);
        let (left, top) = bounds.center_within(self.image_width, self.image_height);
        let html = format!(
            "<img class=\"loading-image\" src=\"{}\" alt=\"\" \
             style=\"position:absolute; left:{}px; top:{}px\">",
            escape_html(image),
            left,
            top,
        );
        self.images.insert(container.to_string(), html);
        &self.images[container]
    }

    /// Remove `container`'s image-only overlay. Returns `false` when none
    /// was shown.
    pub fn hide_image_only(&mut self, container: &str) -> bool {
        self.images.remove(container).is_some()
    }

    /// Markup of `container`'s boxed overlay, if shown.
    #[must_use]
    pub fn html_for(&self, container: &str) -> Option<&str> {
        self.boxed.get(container).map(String::as_str)
    }

    /// Markup of `container`'s image-only overlay, if shown.
    #[must_use]
    pub fn image_html_for(&self, container: &str) -> Option<&str> {
        self.images.get(container).map(String::as_str)
    }

    /// Whether `container` has a boxed overlay.
    #[must_use]
    pub fn is_shown(&self, container: &str) -> bool {
        self.boxed.contains_key(container)
    }

    /// Whether `container` has an image-only overlay.
    #[must_use]
    pub fn is_image_shown(&self, container: &str) -> bool {
        self.images.contains_key(container)
    }

    /// Total overlays shown across both variants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxed.len() + self.images.len()
    }

    /// Whether no overlay is shown anywhere.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxed.is_empty() && self.images.is_empty()
    }
}
