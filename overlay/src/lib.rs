//! hudkit overlay library
//!
//! Software rendering host for HUD widgets.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    surface                          │
//! │                  HudSurface                         │
//! │     (widgets + event bus + edit mode + theme)       │
//! ├─────────────────────────────────────────────────────┤
//! │                    widgets/                         │
//! │          TextWidget, StopwatchWidget                │
//! │        (Renderable content for HudElement)          │
//! ├─────────────────────────────────────────────────────┤
//! │                 canvas + blur                       │
//! │            tiny-skia + cosmic-text                  │
//! │     (drawing primitives, mask blur, PNG export)     │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod blur;
pub mod canvas;
pub mod surface;
pub mod utils;
pub mod widgets;

// Re-export commonly used types
pub use canvas::PixmapCanvas;
pub use surface::{HudSurface, SurfaceError};
pub use widgets::{StopwatchWidget, TextWidget};
