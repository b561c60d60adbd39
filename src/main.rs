mod layout;
mod logging;
mod replay;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use hudkit_core::{HudWidget, PointerAction};
use hudkit_overlay::HudSurface;
use tracing::{info, warn};

use crate::layout::{
    build_surface, load_config, parse_anchor, parse_point, set_widget_settings, store_config,
    sync_offsets,
};

#[derive(Parser)]
#[command(version, about = "Draggable, configurable HUD widgets")]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one frame to a PNG file
    Render {
        /// Draw edit-mode borders
        #[arg(short, long)]
        edit: bool,
        #[arg(short, long, default_value = "frame.png")]
        out: PathBuf,
    },
    /// Drag whatever widget is under --from to --to
    Drag {
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: (f32, f32),
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: (f32, f32),
        /// Intermediate move events between the two points
        #[arg(long, default_value_t = 1)]
        steps: u32,
        /// Write the new offsets back to the config
        #[arg(long)]
        save: bool,
        /// Also render the result
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List widgets with their anchors, offsets and resolved positions
    Layout,
    /// Show a widget's settings, optionally changing and storing some first
    Settings {
        widget: String,
        /// Assignments of the form "Name=value"
        #[arg(long = "set")]
        assignments: Vec<String>,
        /// Include settings hidden by their conditions
        #[arg(long)]
        all: bool,
    },
    /// Change a widget's anchor and store it
    Anchor {
        widget: String,
        /// Alias ("br") or label ("Right Bottom")
        #[arg(value_parser = parse_anchor)]
        anchor: hudkit_types::Anchor,
    },
    /// Run a pointer script against the configured surface
    Replay {
        script: PathBuf,
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<(), String> {
    logging::init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();
    let mut config = load_config(config_path)?;

    match cli.command {
        Commands::Render { edit, out } => {
            let mut surface = build_surface(&config)?;
            surface.set_edit_mode(edit);
            render_to(&mut surface, &out)?;
        }
        Commands::Drag {
            from,
            to,
            steps,
            save,
            out,
        } => {
            let mut surface = build_surface(&config)?;
            surface.set_edit_mode(true);
            surface.render_frame();

            if !surface.dispatch_pointer(PointerAction::Down, from.0, from.1) {
                return Err(format!("no widget at {},{}", from.0, from.1));
            }
            let steps = steps.max(1);
            for i in 1..=steps {
                let t = i as f32 / steps as f32;
                let x = from.0 + (to.0 - from.0) * t;
                let y = from.1 + (to.1 - from.1) * t;
                surface.dispatch_pointer(PointerAction::Move, x, y);
            }
            surface.dispatch_pointer(PointerAction::Up, to.0, to.1);

            let moved = sync_offsets(&surface, &mut config);
            for name in &moved {
                if let Some(w) = config.widget(name) {
                    println!("{}: offset {},{}", name, w.offset_x, w.offset_y);
                }
            }
            if save && !moved.is_empty() {
                store_config(config_path, &config)?;
                info!(widgets = moved.len(), "layout saved");
            }
            if let Some(out) = out {
                render_to(&mut surface, &out)?;
            }
        }
        Commands::Layout => {
            let mut surface = build_surface(&config)?;
            surface.render_frame();
            let (w, h) = (surface.width(), surface.height());

            println!("surface {}x{} ({:?})", w, h, surface.theme());
            for handle in surface.widgets() {
                let widget = handle.borrow();
                let pos = widget.position_in(w, h);
                let size = widget.size();
                let (ox, oy) = widget.offset();
                println!(
                    "{:<16} {:<14} offset {:>5},{:<5} at {:>7.1},{:<7.1} size {:.1}x{:.1}{}",
                    widget.name(),
                    widget.anchor().label(),
                    ox,
                    oy,
                    pos.x,
                    pos.y,
                    size.width,
                    size.height,
                    if handle.is_registered() { "" } else { " (disabled)" }
                );
            }
        }
        Commands::Settings {
            widget,
            assignments,
            all,
        } => {
            if !assignments.is_empty() {
                set_widget_settings(&mut config, &widget, &assignments)?;
                store_config(config_path, &config)?;
            }

            let surface = build_surface(&config)?;
            let handle = surface
                .widget(&widget)
                .ok_or_else(|| format!("unknown widget '{}'", widget))?;
            let element = handle.borrow();

            let settings = element.settings();
            for entry in settings.entries() {
                let visible = settings.is_visible(entry.name());
                if !visible && !all {
                    continue;
                }
                let range = entry
                    .range()
                    .map(|r| format!(" [{}..={}]", r.start(), r.end()))
                    .unwrap_or_default();
                println!(
                    "{:<14} = {}{}{}{}",
                    entry.name(),
                    entry.value(),
                    range,
                    if entry.is_default() { "" } else { " *" },
                    if visible { "" } else { " (hidden)" }
                );
            }
        }
        Commands::Anchor { widget, anchor } => {
            let layout = config
                .widget_mut(&widget)
                .ok_or_else(|| format!("unknown widget '{}'", widget))?;
            layout.anchor = anchor;
            store_config(config_path, &config)?;
            println!("{}: anchor {}", widget, anchor.label());
        }
        Commands::Replay { script, save } => {
            let text = std::fs::read_to_string(&script)
                .map_err(|e| format!("{}: {}", script.display(), e))?;
            let mut surface = build_surface(&config)?;
            let stats = replay::run(&mut surface, &text)?;
            println!(
                "{} steps, {} handled, {} frames",
                stats.steps, stats.handled, stats.frames
            );

            let moved = sync_offsets(&surface, &mut config);
            if save && !moved.is_empty() {
                store_config(config_path, &config)?;
                info!(widgets = moved.len(), "layout saved");
            } else if !moved.is_empty() {
                warn!("widgets moved but --save was not given; layout unchanged");
            }
        }
    }

    Ok(())
}

fn render_to(surface: &mut HudSurface, out: &Path) -> Result<(), String> {
    let needs_refresh = surface.render_frame();
    surface.save_png(out).map_err(|e| e.to_string())?;
    info!(path = %out.display(), needs_refresh, "frame rendered");
    println!("{}", out.display());
    Ok(())
}
