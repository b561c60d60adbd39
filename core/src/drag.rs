//! Per-widget drag tracking
//!
//! ```text
//!            press inside, not handled
//!   ┌──────┐ ─────────────────────────▶ ┌──────────┐
//!   │ idle │                            │ dragging │ ◀─┐ move
//!   └──────┘ ◀───────────────────────── └──────────┘ ──┘
//!                     release
//! ```
//!
//! An idle machine ignores events another consumer already claimed. A machine
//! that is dragging keeps handling its own move/release events and claims
//! every event it sees while the drag lasts.

use crate::event::{PointerAction, PointerEvent};
use crate::position::{Point, Size};

/// Outcome of feeding one pointer event to a [`DragState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragUpdate {
    None,
    Started,
    /// The widget's top-left corner should move to `(x, y)`
    Moved { x: i32, y: i32 },
    Released,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    dragging: bool,
    grab_x: i32,
    grab_y: i32,
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer position relative to the widget origin when the drag started
    pub fn grab_offset(&self) -> (i32, i32) {
        (self.grab_x, self.grab_y)
    }

    /// Drop any drag in progress
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Advance the machine for a widget currently drawn at `origin` with `size`
    pub fn handle(&mut self, event: &mut PointerEvent, origin: Point, size: Size) -> DragUpdate {
        if event.handled && !self.dragging {
            return DragUpdate::None;
        }

        let update = match event.action {
            PointerAction::Down => {
                if !event.handled && contains(origin, size, event.x, event.y) {
                    self.dragging = true;
                    self.grab_x = (event.x - origin.x) as i32;
                    self.grab_y = (event.y - origin.y) as i32;
                    DragUpdate::Started
                } else {
                    DragUpdate::None
                }
            }
            PointerAction::Move if self.dragging => DragUpdate::Moved {
                x: (event.x as i32).saturating_sub(self.grab_x),
                y: (event.y as i32).saturating_sub(self.grab_y),
            },
            PointerAction::Move => DragUpdate::None,
            PointerAction::Up => {
                let was_dragging = self.dragging;
                self.dragging = false;
                if was_dragging {
                    DragUpdate::Released
                } else {
                    DragUpdate::None
                }
            }
        };

        if self.dragging {
            event.handled = true;
        }

        update
    }
}

/// Inclusive hit test against `[origin, origin + size]`
fn contains(origin: Point, size: Size, x: f32, y: f32) -> bool {
    x >= origin.x && y >= origin.y && x <= origin.x + size.width && y <= origin.y + size.height
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(action: PointerAction, x: f32, y: f32) -> PointerEvent {
        PointerEvent::new(action, x, y, 1000, 600)
    }

    const ORIGIN: Point = Point { x: 900.0, y: 560.0 };
    const SIZE: Size = Size {
        width: 100.0,
        height: 40.0,
    };

    #[test]
    fn test_press_inside_starts_drag() {
        let mut drag = DragState::default();
        let mut ev = event(PointerAction::Down, 950.0, 580.0);

        assert_eq!(drag.handle(&mut ev, ORIGIN, SIZE), DragUpdate::Started);
        assert!(drag.is_dragging());
        assert_eq!(drag.grab_offset(), (50, 20));
        assert!(ev.handled);
    }

    #[test]
    fn test_press_on_edges_is_inside() {
        let mut drag = DragState::default();
        let mut ev = event(PointerAction::Down, 1000.0, 600.0);
        assert_eq!(drag.handle(&mut ev, ORIGIN, SIZE), DragUpdate::Started);

        let mut drag = DragState::default();
        let mut ev = event(PointerAction::Down, 900.0, 560.0);
        assert_eq!(drag.handle(&mut ev, ORIGIN, SIZE), DragUpdate::Started);
        assert_eq!(drag.grab_offset(), (0, 0));
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let mut drag = DragState::default();
        let mut ev = event(PointerAction::Down, 10.0, 10.0);

        assert_eq!(drag.handle(&mut ev, ORIGIN, SIZE), DragUpdate::None);
        assert_eq!(drag, DragState::default());
        assert!(!ev.handled);
    }

    #[test]
    fn test_move_reports_target_corner() {
        let mut drag = DragState::default();
        drag.handle(&mut event(PointerAction::Down, 950.0, 580.0), ORIGIN, SIZE);

        let mut ev = event(PointerAction::Move, 800.0, 500.0);
        assert_eq!(
            drag.handle(&mut ev, ORIGIN, SIZE),
            DragUpdate::Moved { x: 750, y: 480 }
        );
        assert!(ev.handled);
    }

    #[test]
    fn test_move_without_drag_does_nothing() {
        let mut drag = DragState::default();
        let mut ev = event(PointerAction::Move, 950.0, 580.0);
        assert_eq!(drag.handle(&mut ev, ORIGIN, SIZE), DragUpdate::None);
        assert!(!ev.handled);
    }

    #[test]
    fn test_release_anywhere_ends_drag() {
        let mut drag = DragState::default();
        drag.handle(&mut event(PointerAction::Down, 950.0, 580.0), ORIGIN, SIZE);

        let mut ev = event(PointerAction::Up, 3.0, 3.0);
        assert_eq!(drag.handle(&mut ev, ORIGIN, SIZE), DragUpdate::Released);
        assert!(!drag.is_dragging());
        assert!(!ev.handled);
    }

    #[test]
    fn test_handled_press_never_starts_drag() {
        let mut drag = DragState::default();
        let mut ev = event(PointerAction::Down, 950.0, 580.0);
        ev.handled = true;

        assert_eq!(drag.handle(&mut ev, ORIGIN, SIZE), DragUpdate::None);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_active_drag_continues_through_handled_events() {
        let mut drag = DragState::default();
        drag.handle(&mut event(PointerAction::Down, 950.0, 580.0), ORIGIN, SIZE);

        let mut ev = event(PointerAction::Move, 960.0, 590.0);
        ev.handled = true;
        assert_eq!(
            drag.handle(&mut ev, ORIGIN, SIZE),
            DragUpdate::Moved { x: 910, y: 570 }
        );

        let mut ev = event(PointerAction::Up, 960.0, 590.0);
        ev.handled = true;
        assert_eq!(drag.handle(&mut ev, ORIGIN, SIZE), DragUpdate::Released);
    }

    #[test]
    fn test_move_far_off_surface_saturates() {
        let mut drag = DragState::default();
        drag.handle(&mut event(PointerAction::Down, 950.0, 580.0), ORIGIN, SIZE);

        let mut ev = event(PointerAction::Move, -1e12, 1e12);
        assert_eq!(
            drag.handle(&mut ev, ORIGIN, SIZE),
            DragUpdate::Moved {
                x: i32::MIN,
                y: i32::MAX - 20
            }
        );
        assert!(drag.is_dragging());
    }

    #[test]
    fn test_cancel_resets() {
        let mut drag = DragState::default();
        drag.handle(&mut event(PointerAction::Down, 950.0, 580.0), ORIGIN, SIZE);
        drag.cancel();
        assert_eq!(drag, DragState::default());
    }
}
