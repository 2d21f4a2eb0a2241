//! Presentation: mirrors the raster surface onto a 2D context.
//!
//! This module is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]. It moves pixels between the
//! [`Surface`] buffer and the canvas element in both directions — presenting
//! the committed raster, and reading back a scaled image draw during upload.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<_, JsValue>`;
//! [`crate::engine::Engine`] handles the result.

use wasm_bindgen::{Clamped, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement, ImageData};

use crate::surface::Surface;

/// Blit the surface pixels onto the canvas context at the origin.
///
/// # Errors
///
/// Returns `Err` when `ImageData` construction or the blit fails.
pub fn present(ctx: &CanvasRenderingContext2d, surface: &Surface) -> Result<(), JsValue> {
    let image = ImageData::new_with_u8_clamped_array_and_sh(Clamped(surface.data()), surface.width(), surface.height())?;
    ctx.put_image_data(&image, 0.0, 0.0)
}

/// Draw a decoded image scaled to `width`×`height` over a white fill and
/// read the resulting pixels back, row-major RGBA.
///
/// The white underlay keeps transparent image regions matching the blank
/// surface color instead of compositing onto stale canvas content.
///
/// # Errors
///
/// Returns `Err` when the scaled draw or the pixel read-back fails (e.g. a
/// tainted canvas).
pub fn rasterize_image(
    ctx: &CanvasRenderingContext2d,
    image: &HtmlImageElement,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, JsValue> {
    let w = f64::from(width);
    let h = f64::from(height);
    ctx.set_fill_style_str("#fff");
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, w, h)?;
    let data = ctx.get_image_data(0.0, 0.0, w, h)?;
    Ok(data.data().0)
}
