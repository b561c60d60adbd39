//! Test doubles shared by the unit tests

use hudkit_types::{Color, HudFont};

use crate::canvas::{BlurSpec, Canvas};
use crate::element::{HudStyle, Refresh, Renderable, WidgetFrame};
use crate::position::Size;
use crate::settings::{Setting, Settings};

/// Drawing call captured by [`RecordingCanvas`], in surface coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Push(f32, f32),
    Pop,
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
    FillRoundedRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    StrokeRoundedRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        stroke_width: f32,
        color: Color,
    },
    Blurred {
        x: f32,
        y: f32,
        color: Color,
        blur: BlurSpec,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
    },
}

pub struct RecordingCanvas {
    width: u32,
    height: u32,
    stack: Vec<(f32, f32)>,
    pub ops: Vec<Op>,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            stack: Vec::new(),
            ops: Vec::new(),
        }
    }

    fn origin(&self) -> (f32, f32) {
        self.stack.last().copied().unwrap_or((0.0, 0.0))
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn push_translation(&mut self, dx: f32, dy: f32) {
        let (ox, oy) = self.origin();
        self.stack.push((ox + dx, oy + dy));
        self.ops.push(Op::Push(dx, dy));
    }

    fn pop_translation(&mut self) {
        self.stack.pop();
        self.ops.push(Op::Pop);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, _color: Color) {
        let (ox, oy) = self.origin();
        self.ops.push(Op::FillRect {
            x: x + ox,
            y: y + oy,
            w,
            h,
        });
    }

    fn fill_rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, _radius: f32, color: Color) {
        let (ox, oy) = self.origin();
        self.ops.push(Op::FillRoundedRect {
            x: x + ox,
            y: y + oy,
            w,
            h,
            color,
        });
    }

    fn stroke_rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        stroke_width: f32,
        color: Color,
    ) {
        let (ox, oy) = self.origin();
        self.ops.push(Op::StrokeRoundedRect {
            x: x + ox,
            y: y + oy,
            w,
            h,
            radius,
            stroke_width,
            color,
        });
    }

    fn fill_rounded_rect_blurred(
        &mut self,
        x: f32,
        y: f32,
        _w: f32,
        _h: f32,
        _radius: f32,
        color: Color,
        blur: BlurSpec,
    ) {
        let (ox, oy) = self.origin();
        self.ops.push(Op::Blurred {
            x: x + ox,
            y: y + oy,
            color,
            blur,
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, _font_size: f32, _font: HudFont, _color: Color) {
        let (ox, oy) = self.origin();
        self.ops.push(Op::Text {
            text: text.to_string(),
            x: x + ox,
            y: y + oy,
        });
    }

    fn measure_text(&mut self, text: &str, font_size: f32, _font: HudFont) -> (f32, f32) {
        (text.chars().count() as f32 * font_size * 0.5, font_size)
    }
}

/// Fixed-size content that fills its bounds
pub struct FixedBox {
    pub size: Size,
    pub refresh: Refresh,
}

impl FixedBox {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
            refresh: Refresh::Idle,
        }
    }
}

impl Renderable for FixedBox {
    fn declare_settings(&mut self, settings: &mut Settings) {
        settings.add(Setting::new("Color", [255u8, 255, 255, 255]));
    }

    fn measure(&mut self, _canvas: &mut dyn Canvas, _settings: &Settings, _style: &HudStyle) -> Size {
        self.size
    }

    fn on_render(&mut self, frame: &mut WidgetFrame<'_>) -> Refresh {
        frame
            .canvas
            .fill_rect(0.0, 0.0, frame.size.width, frame.size.height, [255, 255, 255, 255]);
        self.refresh
    }
}
