//! Pointer gesture scripts
//!
//! One command per line, shell-style quoting:
//!
//! ```text
//! # comments and blank lines are skipped
//! edit on
//! down 950 580
//! move 800 500
//! up 800 500
//! render "after drag.png"
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use hudkit_core::PointerAction;
use hudkit_overlay::HudSurface;
use tracing::{debug, info};

#[derive(Parser)]
#[command(no_binary_name = true)]
struct Line {
    #[command(subcommand)]
    command: Step,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Step {
    /// Toggle edit mode
    Edit {
        #[arg(value_parser = parse_switch, action = ArgAction::Set)]
        enabled: bool,
    },
    #[command(allow_negative_numbers = true)]
    Down { x: f32, y: f32 },
    #[command(allow_negative_numbers = true)]
    Move { x: f32, y: f32 },
    #[command(allow_negative_numbers = true)]
    Up { x: f32, y: f32 },
    /// Render a frame, optionally saving it
    Render { out: Option<PathBuf> },
}

fn parse_switch(input: &str) -> Result<bool, String> {
    match input {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        _ => Err(format!("expected on/off, got '{}'", input)),
    }
}

fn parse_line(line: &str) -> Result<Option<Step>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let args = shlex::split(line).ok_or("error: Invalid quoting")?;
    let parsed = Line::try_parse_from(args).map_err(|e| e.to_string())?;
    Ok(Some(parsed.command))
}

/// Summary of a replayed script
#[derive(Debug, Default, PartialEq)]
pub struct ReplayStats {
    pub steps: usize,
    pub handled: usize,
    pub frames: usize,
}

/// Run every line of `script` against `surface`
pub fn run(surface: &mut HudSurface, script: &str) -> Result<ReplayStats, String> {
    let mut stats = ReplayStats::default();

    for (number, line) in script.lines().enumerate() {
        let Some(step) = parse_line(line).map_err(|e| format!("line {}: {}", number + 1, e))?
        else {
            continue;
        };
        debug!(line = number + 1, ?step, "replay step");
        stats.steps += 1;

        let pointer = match step {
            Step::Edit { enabled } => {
                surface.set_edit_mode(enabled);
                None
            }
            Step::Down { x, y } => Some((PointerAction::Down, x, y)),
            Step::Move { x, y } => Some((PointerAction::Move, x, y)),
            Step::Up { x, y } => Some((PointerAction::Up, x, y)),
            Step::Render { out } => {
                surface.render_frame();
                stats.frames += 1;
                if let Some(path) = out {
                    surface.save_png(&path).map_err(|e| e.to_string())?;
                    info!(path = %path.display(), "frame saved");
                }
                None
            }
        };

        if let Some((action, x, y)) = pointer
            && surface.dispatch_pointer(action, x, y)
        {
            stats.handled += 1;
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use hudkit_core::{HudElement, HudWidget};
    use hudkit_overlay::TextWidget;
    use hudkit_types::Theme;

    use super::*;

    #[test]
    fn test_parse_lines() {
        assert_eq!(parse_line("  # note"), Ok(None));
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(
            parse_line("down 950 580"),
            Ok(Some(Step::Down { x: 950.0, y: 580.0 }))
        );
        assert_eq!(
            parse_line("render 'my frame.png'"),
            Ok(Some(Step::Render {
                out: Some(PathBuf::from("my frame.png"))
            }))
        );
        assert_eq!(parse_line("edit off"), Ok(Some(Step::Edit { enabled: false })));
        assert_eq!(
            parse_line("move -5 12.5"),
            Ok(Some(Step::Move { x: -5.0, y: 12.5 }))
        );
        assert!(parse_line("edit maybe").is_err());
        assert!(parse_line("jump 1 2").is_err());
        assert!(parse_line("render \"unterminated").is_err());
    }

    #[test]
    fn test_replay_drags_widget() {
        let mut surface = HudSurface::new(400, 300, Theme::Dark).unwrap();
        surface
            .add(HudElement::new("label", TextWidget::new("hi")).with_offset(0, 0))
            .unwrap();

        let script = "\
            # move the label by (30, 40)\n\
            edit on\n\
            render\n\
            down 2 2\n\
            move 32 42\n\
            up 32 42\n";
        let stats = run(&mut surface, script).unwrap();

        assert_eq!(
            stats,
            ReplayStats {
                steps: 5,
                handled: 2,
                frames: 1
            }
        );
        assert_eq!(surface.widget("label").unwrap().borrow().offset(), (30, 40));
    }

    #[test]
    fn test_replay_reports_line_number() {
        let mut surface = HudSurface::new(10, 10, Theme::Dark).unwrap();
        let err = run(&mut surface, "edit on\nbogus\n").unwrap_err();
        assert!(err.starts_with("line 2:"), "{err}");
    }
}
