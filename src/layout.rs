//! Building a surface from the app config and writing moves back to it

use std::path::Path;

use hudkit_core::{HudElement, HudWidget, Renderable};
use hudkit_overlay::{HudSurface, StopwatchWidget, TextWidget};
use hudkit_types::{Anchor, HudConfig, WidgetKind, WidgetLayout};
use phf::phf_map;
use tracing::{info, warn};

/// Short names accepted wherever an anchor is typed on the command line
static ANCHOR_ALIASES: phf::Map<&'static str, Anchor> = phf_map! {
    "tl" => Anchor::LeftTop,
    "tc" => Anchor::CenterTop,
    "tr" => Anchor::RightTop,
    "cl" => Anchor::LeftCenter,
    "c" => Anchor::Center,
    "cr" => Anchor::RightCenter,
    "bl" => Anchor::LeftBottom,
    "bc" => Anchor::CenterBottom,
    "br" => Anchor::RightBottom,
    "top" => Anchor::CenterTop,
    "bottom" => Anchor::CenterBottom,
    "left" => Anchor::LeftCenter,
    "right" => Anchor::RightCenter,
    "middle" => Anchor::Center,
};

/// Parse an anchor from an alias ("br") or a label ("Right Bottom", "right_bottom")
pub fn parse_anchor(input: &str) -> Result<Anchor, String> {
    let key: String = input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if let Some(anchor) = ANCHOR_ALIASES.get(key.as_str()) {
        return Ok(*anchor);
    }

    Anchor::ALL
        .iter()
        .zip(Anchor::LABELS)
        .find(|(_, label)| label.replace(' ', "").eq_ignore_ascii_case(&key))
        .map(|(anchor, _)| *anchor)
        .ok_or_else(|| format!("unknown anchor '{}'", input))
}

/// Parse "X,Y" into surface coordinates
pub fn parse_point(input: &str) -> Result<(f32, f32), String> {
    let (x, y) = input
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", input))?;
    let x = x.trim().parse().map_err(|_| format!("invalid x in '{}'", input))?;
    let y = y.trim().parse().map_err(|_| format!("invalid y in '{}'", input))?;
    Ok((x, y))
}

pub fn load_config(path: Option<&Path>) -> Result<HudConfig, String> {
    match path {
        Some(path) => confy::load_path(path),
        None => confy::load("hudkit", "config"),
    }
    .map_err(|e| e.to_string())
}

pub fn store_config(path: Option<&Path>, config: &HudConfig) -> Result<(), String> {
    match path {
        Some(path) => confy::store_path(path, config),
        None => confy::store("hudkit", "config", config),
    }
    .map_err(|e| e.to_string())
}

/// Create a surface holding every widget listed in `config`
pub fn build_surface(config: &HudConfig) -> Result<HudSurface, String> {
    let mut surface = HudSurface::new(config.surface_width, config.surface_height, config.theme())
        .map_err(|e| e.to_string())?;

    for layout in &config.widgets {
        match layout.kind {
            WidgetKind::Text => {
                let text = layout.text.clone().unwrap_or_else(|| layout.name.clone());
                add_widget(&mut surface, layout, TextWidget::new(text))?
            }
            WidgetKind::Stopwatch => add_widget(&mut surface, layout, StopwatchWidget::started())?,
        }

        if !layout.enabled {
            surface.disable(&layout.name).map_err(|e| e.to_string())?;
        }
    }

    info!(
        widgets = config.widgets.len(),
        width = config.surface_width,
        height = config.surface_height,
        "surface built"
    );
    Ok(surface)
}

fn add_widget<R: Renderable>(
    surface: &mut HudSurface,
    layout: &WidgetLayout,
    content: R,
) -> Result<(), String> {
    let mut element =
        HudElement::new(layout.name.clone(), content).with_offset(layout.offset_x, layout.offset_y);
    let alignment = element.keys().alignment;
    element
        .settings_mut()
        .set(alignment, layout.anchor)
        .map_err(|e| e.to_string())?;

    for (name, value) in &layout.settings {
        if let Err(e) = element.settings_mut().set_from_str(name, value) {
            warn!(widget = %layout.name, setting = %name, error = %e, "ignoring stored setting");
        }
    }

    surface.add(element).map_err(|e| e.to_string())
}

/// Apply "Name=value" assignments to a widget and record them in `config`
///
/// Every assignment is checked against the widget's settings first, so a bad
/// one leaves `config` untouched. Values equal to the default are dropped from
/// the stored map; the anchor is kept in `WidgetLayout::anchor`.
pub fn set_widget_settings(
    config: &mut HudConfig,
    widget: &str,
    assignments: &[String],
) -> Result<(), String> {
    let surface = build_surface(config)?;
    let handle = surface
        .widget(widget)
        .ok_or_else(|| format!("unknown widget '{}'", widget))?;
    let mut element = handle.borrow_mut();

    for assignment in assignments {
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| format!("expected Name=value, got '{}'", assignment))?;
        element
            .settings_mut()
            .set_from_str(name.trim(), value)
            .map_err(|e| e.to_string())?;
    }

    let alignment = element.anchor();
    let stored: Vec<(String, Option<String>)> = element
        .settings()
        .entries()
        .filter(|entry| entry.name() != "Alignment")
        .map(|entry| {
            let value = (!entry.is_default()).then(|| entry.value().to_string());
            (entry.name().to_string(), value)
        })
        .collect();

    let layout = config
        .widget_mut(widget)
        .ok_or_else(|| format!("unknown widget '{}'", widget))?;
    layout.anchor = alignment;
    for (name, value) in stored {
        match value {
            Some(value) => layout.settings.insert(name, value),
            None => layout.settings.remove(&name),
        };
    }

    info!(widget, changed = layout.settings.len(), "widget settings updated");
    Ok(())
}

/// Copy current widget offsets back into `config`. Returns the names that changed.
pub fn sync_offsets(surface: &HudSurface, config: &mut HudConfig) -> Vec<String> {
    let mut changed = Vec::new();

    for layout in &mut config.widgets {
        let Some(handle) = surface.widget(&layout.name) else {
            continue;
        };
        let offset = handle.borrow().offset();
        if offset != (layout.offset_x, layout.offset_y) {
            (layout.offset_x, layout.offset_y) = offset;
            changed.push(layout.name.clone());
        }
    }

    changed
}
