pub mod alignment;
pub mod bus;
pub mod canvas;
pub mod drag;
pub mod element;
pub mod error;
pub mod event;
pub mod position;
pub mod settings;
pub mod widget;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use bus::{EventBus, HookId};
pub use canvas::{BlurSpec, Canvas, with_translation};
pub use drag::{DragState, DragUpdate};
pub use element::{BaseKeys, HudElement, HudStyle, HudWidget, Refresh, Renderable, WidgetFrame};
pub use error::SettingsError;
pub use event::{PointerAction, PointerEvent, RenderEvent};
pub use position::{Point, Size, get_position, set_position};
pub use settings::{Entry, Key, Setting, SettingValue, Settings};
pub use widget::WidgetHandle;
