//! Common helpers for overlay rendering

use std::time::Duration;

use hudkit_types::Color;

/// Convert an RGBA array to a tiny_skia color
#[inline]
pub fn color_from_rgba(rgba: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// Format elapsed time as M:SS.t
pub fn format_stopwatch(elapsed: Duration) -> String {
    let tenths = elapsed.as_millis() / 100;
    let secs = tenths / 10;
    format!("{}:{:02}.{}", secs / 60, secs % 60, tenths % 10)
}
