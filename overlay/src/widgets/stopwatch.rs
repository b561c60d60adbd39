//! Elapsed-time display
//!
//! Shows time since start as `M:SS.t`. While running, every frame asks the
//! host for another one so the tenths keep ticking.

use std::time::{Duration, Instant};

use hudkit_core::{Canvas, HudStyle, Refresh, Renderable, Settings, Size, WidgetFrame};

use super::LabelKeys;
use crate::utils::format_stopwatch;

pub struct StopwatchWidget {
    started: Option<Instant>,
    /// Time accumulated before the current run
    banked: Duration,
    keys: Option<LabelKeys>,
}

impl StopwatchWidget {
    /// A stopwatch that is already running
    pub fn started() -> Self {
        Self {
            started: Some(Instant::now()),
            ..Self::stopped()
        }
    }

    pub fn stopped() -> Self {
        Self {
            started: None,
            banked: Duration::ZERO,
            keys: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    pub fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.banked += started.elapsed();
        }
    }

    pub fn reset(&mut self) {
        self.banked = Duration::ZERO;
        if self.started.is_some() {
            self.started = Some(Instant::now());
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.banked + self.started.map(|s| s.elapsed()).unwrap_or_default()
    }

    /// Preset the accumulated time
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.banked = elapsed;
        self
    }

    pub fn display(&self) -> String {
        format_stopwatch(self.elapsed())
    }
}

impl Renderable for StopwatchWidget {
    fn declare_settings(&mut self, settings: &mut Settings) {
        self.keys = Some(LabelKeys::declare(settings));
    }

    fn measure(&mut self, canvas: &mut dyn Canvas, settings: &Settings, style: &HudStyle) -> Size {
        match self.keys {
            // Widest digits keep the box from jittering as time passes
            Some(keys) => keys.measure(canvas, settings, style, &widest(&self.display())),
            None => Size::default(),
        }
    }

    fn on_render(&mut self, frame: &mut WidgetFrame<'_>) -> Refresh {
        if let Some(keys) = self.keys {
            keys.draw(frame, &self.display());
        }

        if self.is_running() {
            Refresh::Soon
        } else {
            Refresh::Idle
        }
    }
}

fn widest(display: &str) -> String {
    display
        .chars()
        .map(|c| if c.is_ascii_digit() { '0' } else { c })
        .collect()
}
