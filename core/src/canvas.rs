//! Drawing surface abstraction
//!
//! The core never touches pixels. Render hooks draw through this trait; the
//! overlay crate provides the software implementation.

use hudkit_types::{BlurMode, Color, HudFont};

/// Mask blur applied to a filled shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurSpec {
    pub radius: f32,
    pub mode: BlurMode,
}

/// A drawable surface with a translation stack
///
/// All coordinates are relative to the current translation.
pub trait Canvas {
    /// Surface width in pixels
    fn width(&self) -> u32;

    /// Surface height in pixels
    fn height(&self) -> u32;

    /// Push a translation on top of the current one
    fn push_translation(&mut self, dx: f32, dy: f32);

    /// Pop the most recent translation
    fn pop_translation(&mut self);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    fn fill_rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: Color);

    fn stroke_rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        stroke_width: f32,
        color: Color,
    );

    /// Fill a rounded rectangle through a blur mask
    fn fill_rounded_rect_blurred(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        color: Color,
        blur: BlurSpec,
    );

    /// Draw text with its baseline at `y`
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, font: HudFont, color: Color);

    /// Measure text as `(width, height)`
    fn measure_text(&mut self, text: &str, font_size: f32, font: HudFont) -> (f32, f32);
}

/// Run `f` with the canvas translated by `(dx, dy)`
pub fn with_translation<R>(
    canvas: &mut dyn Canvas,
    dx: f32,
    dy: f32,
    f: impl FnOnce(&mut dyn Canvas) -> R,
) -> R {
    canvas.push_translation(dx, dy);
    let result = f(&mut *canvas);
    canvas.pop_translation();
    result
}
