//! HUD surface host
//!
//! Owns the canvas, the event bus and the set of widgets. Each frame the
//! canvas is cleared and a render event is dispatched to every enabled widget
//! in the order it was enabled. Pointer input only reaches widgets in edit mode.

use std::path::Path;

use hashbrown::HashMap;
use hudkit_core::{
    EventBus, HudElement, HudWidget, PointerAction, PointerEvent, RenderEvent, Renderable, WidgetHandle,
};
use hudkit_types::Theme;
use tracing::{debug, info};

use crate::canvas::PixmapCanvas;

/// Errors raised by the surface host
#[derive(Debug)]
pub enum SurfaceError {
    /// Width or height was zero
    InvalidSize { width: u32, height: u32 },
    /// A widget with this name is already on the surface
    DuplicateWidget(String),
    /// No widget with this name
    UnknownWidget(String),
    /// Frame could not be written
    Encoding(String),
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceError::InvalidSize { width, height } => {
                write!(f, "Invalid surface size: {}x{}", width, height)
            }
            SurfaceError::DuplicateWidget(s) => write!(f, "Duplicate widget: {}", s),
            SurfaceError::UnknownWidget(s) => write!(f, "Unknown widget: {}", s),
            SurfaceError::Encoding(s) => write!(f, "Encoding error: {}", s),
        }
    }
}

impl std::error::Error for SurfaceError {}

pub struct HudSurface {
    canvas: PixmapCanvas,
    bus: EventBus,
    /// Widgets in insertion order
    widgets: Vec<WidgetHandle>,
    index: HashMap<String, usize>,
    edit_mode: bool,
    theme: Theme,
}

impl HudSurface {
    pub fn new(width: u32, height: u32, theme: Theme) -> Result<Self, SurfaceError> {
        let canvas =
            PixmapCanvas::new(width, height).ok_or(SurfaceError::InvalidSize { width, height })?;

        Ok(Self {
            canvas,
            bus: EventBus::new(),
            widgets: Vec::new(),
            index: HashMap::new(),
            edit_mode: false,
            theme,
        })
    }

    pub fn width(&self) -> u32 {
        self.canvas.pixmap().width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.pixmap().height()
    }

    pub fn canvas(&self) -> &PixmapCanvas {
        &self.canvas
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Toggle edit mode. Leaving it drops any drag in progress.
    pub fn set_edit_mode(&mut self, enabled: bool) {
        if self.edit_mode == enabled {
            return;
        }
        self.edit_mode = enabled;
        if !enabled {
            for widget in &self.widgets {
                widget.borrow_mut().cancel_drag();
            }
        }
        debug!(enabled, "edit mode changed");
    }

    /// Add an enabled widget on top of the existing ones
    pub fn add<R: Renderable>(&mut self, element: HudElement<R>) -> Result<(), SurfaceError> {
        let mut handle = WidgetHandle::new(element);
        let name = handle.borrow().name().to_string();
        if self.index.contains_key(&name) {
            return Err(SurfaceError::DuplicateWidget(name));
        }

        handle.register(&mut self.bus);
        self.index.insert(name, self.widgets.len());
        self.widgets.push(handle);
        Ok(())
    }

    /// Take a widget off the surface, unregistering its hooks
    pub fn remove(&mut self, name: &str) -> Result<WidgetHandle, SurfaceError> {
        let idx = self.position(name)?;
        let mut handle = self.widgets.remove(idx);
        handle.unregister(&mut self.bus);
        self.reindex();
        Ok(handle)
    }

    /// Returns `false` if the widget was already enabled
    pub fn enable(&mut self, name: &str) -> Result<bool, SurfaceError> {
        let idx = self.position(name)?;
        Ok(self.widgets[idx].register(&mut self.bus))
    }

    /// Returns `false` if the widget was already disabled
    pub fn disable(&mut self, name: &str) -> Result<bool, SurfaceError> {
        let idx = self.position(name)?;
        Ok(self.widgets[idx].unregister(&mut self.bus))
    }

    pub fn widget(&self, name: &str) -> Option<&WidgetHandle> {
        self.index.get(name).map(|&i| &self.widgets[i])
    }

    pub fn widgets(&self) -> impl Iterator<Item = &WidgetHandle> {
        self.widgets.iter()
    }

    /// Clear and redraw every enabled widget
    ///
    /// Returns `true` if a widget asked to be redrawn soon.
    pub fn render_frame(&mut self) -> bool {
        self.canvas.clear();
        let mut event = RenderEvent::new(&mut self.canvas, self.edit_mode, self.theme);
        self.bus.emit_render(&mut event);
        event.needs_refresh
    }

    /// Feed one pointer event to the widgets
    ///
    /// Returns whether a widget claimed it. Outside edit mode nothing is
    /// dispatched.
    pub fn dispatch_pointer(&mut self, action: PointerAction, x: f32, y: f32) -> bool {
        if !self.edit_mode {
            return false;
        }
        let mut event = PointerEvent::new(action, x, y, self.width(), self.height());
        self.bus.emit_pointer(&mut event);
        event.handled
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        if !self.canvas.resize(width, height) {
            return Err(SurfaceError::InvalidSize { width, height });
        }
        info!(width, height, "surface resized");
        Ok(())
    }

    pub fn save_png(&self, path: &Path) -> Result<(), SurfaceError> {
        self.canvas
            .save_png(path)
            .map_err(|e| SurfaceError::Encoding(e.to_string()))
    }

    fn position(&self, name: &str) -> Result<usize, SurfaceError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| SurfaceError::UnknownWidget(name.to_string()))
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (i, widget) in self.widgets.iter().enumerate() {
            self.index.insert(widget.borrow().name().to_string(), i);
        }
    }
}
