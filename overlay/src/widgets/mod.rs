//! Concrete HUD widgets
//!
//! - [`TextWidget`] - Static text label
//! - [`StopwatchWidget`] - Running elapsed-time display

mod stopwatch;
mod text;

pub use stopwatch::StopwatchWidget;
pub use text::TextWidget;

use hudkit_core::{Canvas, HudStyle, Key, Setting, Settings, Size, WidgetFrame};
use hudkit_types::{Color, hud_colors};

/// Inner spacing between background edge and text
pub const PADDING: f32 = 8.0;
pub const CORNER_RADIUS: f32 = 6.0;

/// Font settings shared by text-based widgets
#[derive(Debug, Clone, Copy)]
struct LabelKeys {
    size: Key<f32>,
    color: Key<Color>,
}

impl LabelKeys {
    fn declare(settings: &mut Settings) -> Self {
        Self {
            size: settings.add(Setting::new("Text Size", 18.0f32).with_range(6.0..=96.0)),
            color: settings.add(Setting::new("Text Color", hud_colors::WHITE)),
        }
    }

    fn measure(&self, canvas: &mut dyn Canvas, settings: &Settings, style: &HudStyle, text: &str) -> Size {
        let (w, h) = canvas.measure_text(text, settings.get(self.size), style.font);
        Size::new(w + PADDING * 2.0, h + PADDING * 2.0)
    }

    /// Background plus text, baseline one font size below the top padding
    fn draw(&self, frame: &mut WidgetFrame<'_>, text: &str) {
        let size = frame.settings.get(self.size);
        let color = frame.settings.get(self.color);

        frame.draw_background(hud_colors::WIDGET_BG, CORNER_RADIUS);
        frame
            .canvas
            .draw_text(text, PADDING, PADDING + size, size, frame.style.font, color);
    }
}
