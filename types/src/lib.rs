//! Shared configuration types for hudkit
//!
//! This crate contains the serializable types shared between the HUD core,
//! the overlay renderer, and the CLI: anchors, font and blur choices, colors,
//! and the application config that describes which widgets are shown where.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// RGBA color
pub type Color = [u8; 4];

// ─────────────────────────────────────────────────────────────────────────────
// Anchors
// ─────────────────────────────────────────────────────────────────────────────

/// Reference point on the surface that a widget's offset is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    #[default]
    LeftTop,
    CenterTop,
    RightTop,
    LeftCenter,
    Center,
    RightCenter,
    LeftBottom,
    CenterBottom,
    RightBottom,
}

impl Anchor {
    /// All anchors, indexed by discriminant
    pub const ALL: &'static [Anchor] = &[
        Self::LeftTop,
        Self::CenterTop,
        Self::RightTop,
        Self::LeftCenter,
        Self::Center,
        Self::RightCenter,
        Self::LeftBottom,
        Self::CenterBottom,
        Self::RightBottom,
    ];

    /// Display labels, indexed by discriminant
    pub const LABELS: &'static [&'static str] = &[
        "Left Top",
        "Center Top",
        "Right Top",
        "Left Center",
        "Center",
        "Right Center",
        "Left Bottom",
        "Center Bottom",
        "Right Bottom",
    ];

    pub fn label(&self) -> &'static str {
        Self::LABELS[*self as usize]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fonts and Effects
// ─────────────────────────────────────────────────────────────────────────────

/// Font family used for widget text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HudFont {
    #[default]
    Default,
    SansSerif,
    Serif,
    Monospace,
}

impl HudFont {
    pub const ALL: &'static [HudFont] = &[Self::Default, Self::SansSerif, Self::Serif, Self::Monospace];
    pub const LABELS: &'static [&'static str] = &["Default", "Sans Serif", "Serif", "Monospace"];

    pub fn label(&self) -> &'static str {
        Self::LABELS[*self as usize]
    }
}

/// How a blurred shape is combined with its sharp outline.
///
/// - `Normal`: blur inside and outside the shape
/// - `Solid`: sharp inside, blurred outside
/// - `Outer`: nothing inside, blurred outside
/// - `Inner`: blurred inside, nothing outside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlurMode {
    #[default]
    Normal,
    Solid,
    Outer,
    Inner,
}

impl BlurMode {
    pub const ALL: &'static [BlurMode] = &[Self::Normal, Self::Solid, Self::Outer, Self::Inner];
    pub const LABELS: &'static [&'static str] = &["Normal", "Solid", "Outer", "Inner"];

    pub fn label(&self) -> &'static str {
        Self::LABELS[*self as usize]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Theme
// ─────────────────────────────────────────────────────────────────────────────

/// Host theme used to pick accent colors for edit-mode chrome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    /// Accent color for the edit-mode selection border
    pub fn accent(&self) -> Color {
        match self {
            Self::Dark => hud_colors::ACCENT_DARK,
            Self::Light => hud_colors::ACCENT_LIGHT,
        }
    }
}

pub mod hud_colors {
    use super::Color;

    pub const WHITE: Color = [255, 255, 255, 255];
    pub const ACCENT_DARK: Color = [208, 188, 255, 255];
    pub const ACCENT_LIGHT: Color = [103, 80, 164, 255];
    pub const WIDGET_BG: Color = [30, 30, 30, 160];
}

// ─────────────────────────────────────────────────────────────────────────────
// Serde Default Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}
fn default_offset() -> i32 {
    100
}
fn default_surface_width() -> u32 {
    1280
}
fn default_surface_height() -> u32 {
    720
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Config
// ─────────────────────────────────────────────────────────────────────────────

/// Kind of widget to construct for a layout entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    #[default]
    Text,
    Stopwatch,
}

/// Placement of one widget on the surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetLayout {
    pub name: String,
    #[serde(default)]
    pub kind: WidgetKind,
    #[serde(default)]
    pub anchor: Anchor,
    #[serde(default = "default_offset")]
    pub offset_x: i32,
    #[serde(default = "default_offset")]
    pub offset_y: i32,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Widget settings changed from their defaults, by setting name
    #[serde(default)]
    pub settings: BTreeMap<String, String>,
}

impl WidgetLayout {
    pub fn new(name: impl Into<String>, kind: WidgetKind) -> Self {
        Self {
            name: name.into(),
            kind,
            anchor: Anchor::default(),
            offset_x: default_offset(),
            offset_y: default_offset(),
            text: None,
            enabled: true,
            settings: BTreeMap::new(),
        }
    }
}

/// Top-level application config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudConfig {
    #[serde(default = "default_surface_width")]
    pub surface_width: u32,
    #[serde(default = "default_surface_height")]
    pub surface_height: u32,
    #[serde(default = "default_true")]
    pub dark_theme: bool,
    #[serde(default)]
    pub widgets: Vec<WidgetLayout>,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            surface_width: default_surface_width(),
            surface_height: default_surface_height(),
            dark_theme: true,
            widgets: vec![
                WidgetLayout {
                    text: Some("hudkit".to_string()),
                    ..WidgetLayout::new("Label", WidgetKind::Text)
                },
                WidgetLayout {
                    anchor: Anchor::RightTop,
                    offset_x: -20,
                    offset_y: 20,
                    ..WidgetLayout::new("Stopwatch", WidgetKind::Stopwatch)
                },
            ],
        }
    }
}

impl HudConfig {
    pub fn theme(&self) -> Theme {
        Theme::from_dark(self.dark_theme)
    }

    pub fn widget(&self, name: &str) -> Option<&WidgetLayout> {
        self.widgets.iter().find(|w| w.name == name)
    }

    pub fn widget_mut(&mut self, name: &str) -> Option<&mut WidgetLayout> {
        self.widgets.iter_mut().find(|w| w.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_follow_discriminants() {
        assert_eq!(Anchor::ALL.len(), Anchor::LABELS.len());
        assert_eq!(Anchor::RightBottom.label(), "Right Bottom");
        assert_eq!(HudFont::Monospace.label(), "Monospace");
        assert_eq!(BlurMode::Outer.label(), "Outer");
        for (i, anchor) in Anchor::ALL.iter().enumerate() {
            assert_eq!(*anchor as usize, i);
        }
    }

    #[test]
    fn test_theme_accent() {
        assert_eq!(Theme::from_dark(true).accent(), [208, 188, 255, 255]);
        assert_eq!(Theme::from_dark(false).accent(), [103, 80, 164, 255]);
    }

    #[test]
    fn test_default_config_lookup() {
        let mut config = HudConfig::default();
        assert!(config.widget("Label").is_some());
        config.widget_mut("Stopwatch").unwrap().offset_x = 5;
        assert_eq!(config.widget("Stopwatch").unwrap().offset_x, 5);
        assert!(config.widget("Missing").is_none());
    }
}
