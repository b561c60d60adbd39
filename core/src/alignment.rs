//! Anchor resolution
//!
//! Maps one of the nine anchors to a pixel point on a surface. Left/top edges
//! resolve to `0`, right/bottom edges to the full dimension, centers use
//! integer division.

use hudkit_types::Anchor;

/// Resolve an anchor to its pixel point on a `surface_width` x `surface_height` surface
pub fn resolve(anchor: Anchor, surface_width: u32, surface_height: u32) -> (i32, i32) {
    let w = surface_width as i32;
    let h = surface_height as i32;

    let x = match anchor {
        Anchor::LeftTop | Anchor::LeftCenter | Anchor::LeftBottom => 0,
        Anchor::CenterTop | Anchor::Center | Anchor::CenterBottom => w / 2,
        Anchor::RightTop | Anchor::RightCenter | Anchor::RightBottom => w,
    };
    let y = match anchor {
        Anchor::LeftTop | Anchor::CenterTop | Anchor::RightTop => 0,
        Anchor::LeftCenter | Anchor::Center | Anchor::RightCenter => h / 2,
        Anchor::LeftBottom | Anchor::CenterBottom | Anchor::RightBottom => h,
    };

    (x, y)
}
