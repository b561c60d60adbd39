//! Events dispatched by the host to widget hooks

use hudkit_types::Theme;

use crate::canvas::Canvas;

/// Fired once per frame
pub struct RenderEvent<'a> {
    pub canvas: &'a mut dyn Canvas,
    pub edit_mode: bool,
    pub theme: Theme,
    /// Host scheduling flag. Cleared by the host before dispatch, set by any
    /// widget whose content changes before the next natural refresh.
    pub needs_refresh: bool,
}

impl<'a> RenderEvent<'a> {
    pub fn new(canvas: &'a mut dyn Canvas, edit_mode: bool, theme: Theme) -> Self {
        Self {
            canvas,
            edit_mode,
            theme,
            needs_refresh: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }
}

/// Single-pointer action kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Down,
    Move,
    Up,
}

/// Pointer input in surface space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub x: f32,
    pub y: f32,
    pub view_width: u32,
    pub view_height: u32,
    /// Set by the first consumer that claims the event
    pub handled: bool,
}

impl PointerEvent {
    pub fn new(action: PointerAction, x: f32, y: f32, view_width: u32, view_height: u32) -> Self {
        Self {
            action,
            x,
            y,
            view_width,
            view_height,
            handled: false,
        }
    }
}
