//! HUD element base
//!
//! [`HudElement`] wraps a concrete [`Renderable`] with everything every HUD
//! widget shares: a name, the user offset, the base settings (alignment, font,
//! blur, shadow), drag tracking, and the render and pointer hooks. Concrete
//! widgets only measure and draw their content.

use hudkit_types::{Anchor, BlurMode, Color, HudFont, Theme};
use tracing::debug;

use crate::canvas::{BlurSpec, Canvas, with_translation};
use crate::drag::{DragState, DragUpdate};
use crate::event::{PointerEvent, RenderEvent};
use crate::position::{Point, Size, get_position, set_position};
use crate::settings::{Key, Setting, Settings};

/// Default offset from the anchor for a new element
pub const DEFAULT_OFFSET: i32 = 100;

/// Edit-mode border geometry
const BORDER_MARGIN: f32 = 5.0;
const BORDER_STROKE_WIDTH: f32 = 10.0;
const BORDER_CORNER_RADIUS: f32 = 15.0;

/// Whether a widget wants another frame soon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Refresh {
    /// Content is static until something else changes
    #[default]
    Idle,
    /// Content changes on its own (clocks, counters)
    Soon,
}

/// Visual options resolved from the base settings for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudStyle {
    pub font: HudFont,
    pub blur: Option<BlurSpec>,
    pub shadow_radius: f32,
    pub shadow_alpha: u8,
}

/// Per-frame drawing context handed to [`Renderable::on_render`]
///
/// The canvas is already translated to the widget origin.
pub struct WidgetFrame<'a> {
    pub canvas: &'a mut dyn Canvas,
    pub edit_mode: bool,
    pub size: Size,
    pub style: &'a HudStyle,
    pub settings: &'a Settings,
}

impl WidgetFrame<'_> {
    /// Fill the widget bounds with `color`, applying shadow and blur options
    pub fn draw_background(&mut self, color: Color, corner_radius: f32) {
        let Size { width, height } = self.size;

        if self.style.shadow_radius > 0.0 && self.style.shadow_alpha > 0 {
            let shadow = [0, 0, 0, self.style.shadow_alpha];
            self.canvas.fill_rounded_rect_blurred(
                0.0,
                0.0,
                width,
                height,
                corner_radius,
                shadow,
                BlurSpec {
                    radius: self.style.shadow_radius,
                    mode: BlurMode::Outer,
                },
            );
        }

        match self.style.blur {
            Some(blur) if blur.radius > 0.0 => self
                .canvas
                .fill_rounded_rect_blurred(0.0, 0.0, width, height, corner_radius, color, blur),
            _ => self
                .canvas
                .fill_rounded_rect(0.0, 0.0, width, height, corner_radius, color),
        }
    }
}

/// Content of a HUD widget
pub trait Renderable: 'static {
    /// Declare widget-specific settings next to the base ones
    fn declare_settings(&mut self, _settings: &mut Settings) {}

    /// Report the content size for this frame
    fn measure(&mut self, canvas: &mut dyn Canvas, settings: &Settings, style: &HudStyle) -> Size;

    /// Draw the content at the (already translated) origin
    fn on_render(&mut self, frame: &mut WidgetFrame<'_>) -> Refresh;
}

/// Keys of the settings every element declares
#[derive(Debug, Clone, Copy)]
pub struct BaseKeys {
    pub alignment: Key<Anchor>,
    pub font: Key<HudFont>,
    pub blur: Key<bool>,
    pub blur_radius: Key<f32>,
    pub blur_mode: Key<BlurMode>,
    pub shadow_radius: Key<f32>,
    pub shadow_alpha: Key<i32>,
}

impl BaseKeys {
    fn declare(settings: &mut Settings) -> Self {
        let alignment = settings.add(Setting::new("Alignment", Anchor::LeftTop));
        let font = settings.add(Setting::new("Font", HudFont::Default));
        let blur = settings.add(Setting::new("Blur", true));
        let blur_radius = settings.add(
            Setting::new("Blur Radius", 1.0f32)
                .with_range(0.0..=80.0)
                .visible_when(move |s| s.get(blur)),
        );
        let blur_mode = settings
            .add(Setting::new("Blur Mode", BlurMode::Normal).visible_when(move |s| s.get(blur)));
        let shadow_radius =
            settings.add(Setting::new("Shadow Radius", 0.0f32).with_range(0.0..=10.0));
        let shadow_alpha = settings.add(Setting::new("Shadow Alpha", 160i32).with_range(0..=255));

        Self {
            alignment,
            font,
            blur,
            blur_radius,
            blur_mode,
            shadow_radius,
            shadow_alpha,
        }
    }
}

/// Object-safe view of an element, used by hosts and the bus
pub trait HudWidget {
    fn name(&self) -> &str;
    fn offset(&self) -> (i32, i32);
    fn set_offset(&mut self, x: i32, y: i32);
    fn anchor(&self) -> Anchor;
    /// Size measured during the last rendered frame
    fn size(&self) -> Size;
    fn settings(&self) -> &Settings;
    fn settings_mut(&mut self) -> &mut Settings;
    fn is_dragging(&self) -> bool;
    fn cancel_drag(&mut self);
    /// Draw origin on a `surface_width` x `surface_height` surface
    fn position_in(&self, surface_width: u32, surface_height: u32) -> Point;
    /// Render hook
    fn on_render_event(&mut self, event: &mut RenderEvent<'_>);
    /// Input hook
    fn on_pointer_event(&mut self, event: &mut PointerEvent);
}

pub struct HudElement<R: Renderable> {
    name: String,
    offset_x: i32,
    offset_y: i32,
    settings: Settings,
    keys: BaseKeys,
    drag: DragState,
    size: Size,
    content: R,
}

impl<R: Renderable> HudElement<R> {
    pub fn new(name: impl Into<String>, mut content: R) -> Self {
        let mut settings = Settings::new();
        let keys = BaseKeys::declare(&mut settings);
        content.declare_settings(&mut settings);

        Self {
            name: name.into(),
            offset_x: DEFAULT_OFFSET,
            offset_y: DEFAULT_OFFSET,
            settings,
            keys,
            drag: DragState::default(),
            size: Size::default(),
            content,
        }
    }

    pub fn with_offset(mut self, x: i32, y: i32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    pub fn keys(&self) -> &BaseKeys {
        &self.keys
    }

    pub fn content(&self) -> &R {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut R {
        &mut self.content
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Resolve the base settings into this frame's style
    pub fn style(&self) -> HudStyle {
        let s = &self.settings;
        let k = &self.keys;
        HudStyle {
            font: s.get(k.font),
            blur: s.get(k.blur).then(|| BlurSpec {
                radius: s.get(k.blur_radius),
                mode: s.get(k.blur_mode),
            }),
            shadow_radius: s.get(k.shadow_radius),
            shadow_alpha: s.get(k.shadow_alpha).clamp(0, 255) as u8,
        }
    }

    /// Move the element so that its origin lands on `(x, y)`
    pub fn set_position_in(&mut self, surface_width: u32, surface_height: u32, x: i32, y: i32) {
        let (ox, oy) = set_position(self.anchor(), surface_width, surface_height, x, y);
        self.offset_x = ox;
        self.offset_y = oy;
    }

    fn draw_border(&self, canvas: &mut dyn Canvas, origin: Point, theme: Theme) {
        canvas.stroke_rounded_rect(
            origin.x - BORDER_MARGIN,
            origin.y - BORDER_MARGIN,
            self.size.width + BORDER_MARGIN * 2.0,
            self.size.height + BORDER_MARGIN * 2.0,
            BORDER_CORNER_RADIUS,
            BORDER_STROKE_WIDTH,
            theme.accent(),
        );
    }
}

impl<R: Renderable> HudWidget for HudElement<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn offset(&self) -> (i32, i32) {
        (self.offset_x, self.offset_y)
    }

    fn set_offset(&mut self, x: i32, y: i32) {
        self.offset_x = x;
        self.offset_y = y;
    }

    fn anchor(&self) -> Anchor {
        self.settings.get(self.keys.alignment)
    }

    fn size(&self) -> Size {
        self.size
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    fn position_in(&self, surface_width: u32, surface_height: u32) -> Point {
        get_position(
            self.anchor(),
            self.offset_x,
            self.offset_y,
            self.size,
            surface_width,
            surface_height,
        )
    }

    fn on_render_event(&mut self, event: &mut RenderEvent<'_>) {
        let style = self.style();
        let size = self.content.measure(&mut *event.canvas, &self.settings, &style);
        debug_assert!(
            size.width >= 0.0 && size.height >= 0.0,
            "negative size from '{}'",
            self.name
        );
        self.size = size;

        let origin = self.position_in(event.width(), event.height());
        let edit_mode = event.edit_mode;
        let content = &mut self.content;
        let settings = &self.settings;

        let refresh = with_translation(&mut *event.canvas, origin.x, origin.y, |canvas| {
            content.on_render(&mut WidgetFrame {
                canvas,
                edit_mode,
                size,
                style: &style,
                settings,
            })
        });

        if edit_mode {
            self.draw_border(&mut *event.canvas, origin, event.theme);
        }

        if refresh == Refresh::Soon {
            event.needs_refresh = true;
        }
    }

    fn on_pointer_event(&mut self, event: &mut PointerEvent) {
        let origin = self.position_in(event.view_width, event.view_height);

        match self.drag.handle(event, origin, self.size) {
            DragUpdate::Started => {
                let (gx, gy) = self.drag.grab_offset();
                debug!(widget = %self.name, grab_x = gx, grab_y = gy, "drag started");
            }
            DragUpdate::Moved { x, y } => {
                self.set_position_in(event.view_width, event.view_height, x, y);
            }
            DragUpdate::Released => {
                debug!(
                    widget = %self.name,
                    offset_x = self.offset_x,
                    offset_y = self.offset_y,
                    "drag released"
                );
            }
            DragUpdate::None => {}
        }
    }
}
