//! Static text label

use hudkit_core::{Canvas, HudStyle, Key, Refresh, Renderable, Setting, Settings, Size, WidgetFrame};

use super::LabelKeys;

#[derive(Debug, Clone, Copy)]
struct TextKeys {
    text: Key<String>,
    label: LabelKeys,
}

/// A single line of user-editable text on a rounded background
pub struct TextWidget {
    initial: String,
    keys: Option<TextKeys>,
}

impl TextWidget {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            initial: text.into(),
            keys: None,
        }
    }
}

impl Renderable for TextWidget {
    fn declare_settings(&mut self, settings: &mut Settings) {
        let text = settings.add(Setting::new("Text", self.initial.clone()));
        let label = LabelKeys::declare(settings);
        self.keys = Some(TextKeys { text, label });
    }

    fn measure(&mut self, canvas: &mut dyn Canvas, settings: &Settings, style: &HudStyle) -> Size {
        let Some(keys) = self.keys else {
            return Size::default();
        };
        keys.label
            .measure(canvas, settings, style, &settings.get(keys.text))
    }

    fn on_render(&mut self, frame: &mut WidgetFrame<'_>) -> Refresh {
        if let Some(keys) = self.keys {
            let text = frame.settings.get(keys.text);
            keys.label.draw(frame, &text);
        }
        Refresh::Idle
    }
}
