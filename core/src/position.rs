//! Widget placement
//!
//! A widget's draw origin is its anchor point plus the user offset, clamped so
//! that the widget's far (right/bottom) edge never leaves the surface. The
//! near edge is not clamped: a widget dragged past its anchor towards the
//! left/top keeps its negative origin.

use hudkit_types::Anchor;

use crate::alignment::resolve;

/// A point in surface space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a widget's content
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Compute the draw origin of a widget
///
/// Returns `anchor + offset`, pulled back so that `origin + size` does not
/// exceed the surface on either axis.
pub fn get_position(
    anchor: Anchor,
    offset_x: i32,
    offset_y: i32,
    size: Size,
    surface_width: u32,
    surface_height: u32,
) -> Point {
    let (anchor_x, anchor_y) = resolve(anchor, surface_width, surface_height);
    let x = anchor_x as f32 + offset_x as f32;
    let y = anchor_y as f32 + offset_y as f32;

    Point {
        x: x.min(surface_width as f32 - size.width),
        y: y.min(surface_height as f32 - size.height),
    }
}

/// Recover the offset that places a widget's origin at `(x, y)`
///
/// No clamping is applied here; it happens when the origin is read back
/// through [`get_position`].
pub fn set_position(
    anchor: Anchor,
    surface_width: u32,
    surface_height: u32,
    x: i32,
    y: i32,
) -> (i32, i32) {
    let (anchor_x, anchor_y) = resolve(anchor, surface_width, surface_height);
    (x.saturating_sub(anchor_x), y.saturating_sub(anchor_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unclamped_is_anchor_plus_offset() {
        let size = Size::new(100.0, 40.0);
        let pos = get_position(Anchor::LeftTop, 100, 100, size, 1000, 600);
        assert_eq!(pos, Point::new(100.0, 100.0));

        let pos = get_position(Anchor::Center, -50, -20, size, 1000, 600);
        assert_eq!(pos, Point::new(450.0, 280.0));
    }

    #[test]
    fn test_far_edge_clamp() {
        let size = Size::new(100.0, 40.0);
        let pos = get_position(Anchor::RightBottom, 0, 0, size, 1000, 600);
        assert_eq!(pos, Point::new(900.0, 560.0));

        let pos = get_position(Anchor::RightBottom, 500, 500, size, 1000, 600);
        assert_eq!(pos, Point::new(900.0, 560.0));
    }

    #[test]
    fn test_near_edge_not_clamped() {
        let size = Size::new(100.0, 40.0);
        let pos = get_position(Anchor::LeftTop, -30, -10, size, 1000, 600);
        assert_eq!(pos, Point::new(-30.0, -10.0));
    }

    #[test]
    fn test_oversized_widget_does_not_panic() {
        let size = Size::new(2000.0, 900.0);
        let pos = get_position(Anchor::LeftTop, 0, 0, size, 1000, 600);
        assert_eq!(pos, Point::new(-1000.0, -300.0));
    }

    #[test]
    fn test_clamp_invariant_holds_everywhere() {
        let sizes = [Size::new(0.0, 0.0), Size::new(100.0, 40.0), Size::new(640.0, 700.0)];
        for &anchor in Anchor::ALL {
            for &size in &sizes {
                for &(ox, oy) in &[
                    (0, 0),
                    (100, 100),
                    (-400, -400),
                    (5000, 5000),
                    (i32::MAX, i32::MAX),
                    (i32::MIN, i32::MIN),
                ] {
                    let pos = get_position(anchor, ox, oy, size, 1000, 600);
                    assert!(pos.x + size.width <= 1000.0);
                    assert!(pos.y + size.height <= 600.0);
                }
            }
        }
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let size = Size::new(100.0, 40.0);
        for &anchor in Anchor::ALL {
            let (ox, oy) = set_position(anchor, 1000, 600, 750, 480);
            let pos = get_position(anchor, ox, oy, size, 1000, 600);
            assert_eq!(pos, Point::new(750.0, 480.0), "{anchor:?}");
        }
    }

    #[test]
    fn test_set_position_is_unclamped() {
        assert_eq!(set_position(Anchor::RightBottom, 1000, 600, 750, 480), (-250, -120));
        assert_eq!(set_position(Anchor::LeftTop, 1000, 600, 5000, -10), (5000, -10));
    }

    #[test]
    fn test_extreme_offsets_saturate() {
        let size = Size::new(100.0, 40.0);
        let pos = get_position(Anchor::RightBottom, i32::MAX, 0, size, 1000, 600);
        assert_eq!(pos, Point::new(900.0, 560.0));

        let pos = get_position(Anchor::RightBottom, i32::MIN, i32::MIN, size, 1000, 600);
        assert!(pos.x < 0.0 && pos.y < 0.0);

        assert_eq!(
            set_position(Anchor::RightBottom, 1000, 600, i32::MIN, i32::MIN),
            (i32::MIN, i32::MIN)
        );
    }
}
