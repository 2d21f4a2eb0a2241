use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::consts::{SURFACE_HEIGHT, SURFACE_WIDTH};
use crate::geom::Point;
use crate::input::StrokeState;
use crate::render;
use crate::surface::{SizeMismatch, Surface};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Core pad state — all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser
/// dependencies. Strokes are rasterized segment-by-segment; the surface only
/// mutates while the gesture state machine is in `Drawing`.
pub struct PadCore {
    pub surface: Surface,
    pub stroke: StrokeState,
}

impl Default for PadCore {
    fn default() -> Self {
        Self::with_size(SURFACE_WIDTH, SURFACE_HEIGHT)
    }
}

impl PadCore {
    /// Create a blank pad at the default surface size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a blank pad with an explicit surface size.
    #[must_use]
    pub fn with_size(width: u32, height: u32) -> Self {
        Self { surface: Surface::new(width, height), stroke: StrokeState::Idle }
    }

    // --- Stroke gesture ---

    /// Start (or re-anchor) a stroke at `position`.
    ///
    /// When a stroke is already in progress the anchor is simply replaced;
    /// drawing continues from the new position. No pixels change here — the
    /// first segment lands on the next [`Self::extend_stroke`].
    pub fn begin_stroke(&mut self, position: Point) {
        self.stroke = StrokeState::Drawing { last: position };
    }

    /// Extend the active stroke to `position`, rasterizing one segment.
    ///
    /// No-op while idle, so stray pointer-moves never mutate the surface.
    pub fn extend_stroke(&mut self, position: Point) {
        let StrokeState::Drawing { last } = self.stroke else {
            return;
        };
        self.surface.stroke_line(last, position);
        self.stroke = StrokeState::Drawing { last: position };
    }

    /// End the active stroke. Idempotent.
    pub fn end_stroke(&mut self) {
        self.stroke = StrokeState::Idle;
    }

    /// Whether a stroke is currently in progress.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.stroke.is_drawing()
    }

    // --- Surface lifecycle ---

    /// Reset the surface to uniform background.
    pub fn clear(&mut self) {
        self.surface.clear();
    }

    /// Commit an already-scaled raster (e.g. a decoded upload) as the new
    /// surface content, replacing any prior strokes entirely.
    ///
    /// # Errors
    ///
    /// Returns [`SizeMismatch`] when the buffer does not match the surface
    /// dimensions.
    pub fn replace_surface(&mut self, pixels: &[u8]) -> Result<(), SizeMismatch> {
        self.surface.replace(pixels)
    }
}

/// The full pad engine. Wraps [`PadCore`] and owns the browser canvas
/// element, mirroring the raster onto it after every mutation.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub core: PadCore,
}

impl Engine {
    /// Create an engine bound to the given canvas element.
    ///
    /// Sizes the element to the surface dimensions and presents the blank
    /// surface immediately.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the 2D context is unavailable or the initial
    /// presentation fails.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let core = PadCore::new();
        canvas.set_width(core.surface.width());
        canvas.set_height(core.surface.height());
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas 2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let engine = Self { canvas, ctx, core };
        engine.present()?;
        Ok(engine)
    }

    // --- Stroke gesture ---

    pub fn begin_stroke(&mut self, position: Point) {
        self.core.begin_stroke(position);
    }

    /// Extend the active stroke and present the new segment.
    ///
    /// # Errors
    ///
    /// Returns `Err` when presentation fails.
    pub fn extend_stroke(&mut self, position: Point) -> Result<(), JsValue> {
        if !self.core.is_drawing() {
            return Ok(());
        }
        self.core.extend_stroke(position);
        self.present()
    }

    pub fn end_stroke(&mut self) {
        self.core.end_stroke();
    }

    // --- Surface lifecycle ---

    /// Reset the surface to blank and present it.
    ///
    /// # Errors
    ///
    /// Returns `Err` when presentation fails.
    pub fn clear(&mut self) -> Result<(), JsValue> {
        self.core.clear();
        self.present()
    }

    /// Replace the surface with a decoded image scaled to its dimensions.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the 2D draw or pixel read-back fails.
    pub fn load_image(&mut self, image: &HtmlImageElement) -> Result<(), JsValue> {
        let width = self.core.surface.width();
        let height = self.core.surface.height();
        let pixels = render::rasterize_image(&self.ctx, image, width, height)?;
        self.core
            .replace_surface(&pixels)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.present()
    }

    /// Serialize the committed surface to a PNG data URI.
    ///
    /// # Errors
    ///
    /// Returns `Err` when presentation or encoding fails.
    pub fn snapshot_data_url(&self) -> Result<String, JsValue> {
        self.present()?;
        self.canvas.to_data_url()
    }

    /// Mirror the committed raster onto the canvas element.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the `ImageData` blit fails.
    pub fn present(&self) -> Result<(), JsValue> {
        render::present(&self.ctx, &self.core.surface)
    }
}
