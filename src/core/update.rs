//! Timer-driven update cycle
//!
//! [`TempGraph`] owns the registry, the history, and the configuration; the
//! host owns the timer and the surface. Two events drive everything: a tick
//! pushes a fresh sample and re-renders, a resize migrates the history to the
//! new surface width and re-renders. Both run on the host's single event
//! stream, so nothing here needs synchronization.

use crate::config::WidgetConfig;
use crate::core::constants::{BORDER_SIZE, MIN_SURFACE_WIDTH};
use crate::history::History;
use crate::render::{render, DrawOp, SurfaceSize};
use crate::sensors::{Reading, SensorRegistry, SensorRoots};
use log::debug;
use serde_json::Value;
use std::collections::HashMap;

/// Widget state machine: sensors, history, and configuration in one place
pub struct TempGraph {
    config: WidgetConfig,
    registry: SensorRegistry,
    history: Option<History>,
    surface: Option<SurfaceSize>,
    last: Option<Reading>,
    stopped: bool,
}

impl TempGraph {
    /// Create the widget and discover sensors under the real kernel paths.
    pub fn new(config: WidgetConfig) -> Self {
        Self::with_roots(config, &SensorRoots::default())
    }

    /// Create the widget discovering under custom roots.
    pub fn with_roots(config: WidgetConfig, roots: &SensorRoots) -> Self {
        let mut registry = SensorRegistry::new();
        registry.discover_in(roots);
        Self {
            config,
            registry,
            history: None,
            surface: None,
            last: None,
            stopped: false,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn registry(&self) -> &SensorRegistry {
        &self.registry
    }

    /// Outcome of the most recent tick.
    pub fn last_reading(&self) -> Option<Reading> {
        self.last
    }

    /// Permanently stop the update cycle; subsequent ticks do nothing.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// One timer tick: sample, push, render.
    ///
    /// Returns `None` once stopped, or before the first resize has sized the
    /// surface. A tick with no readable sensor still pushes the sentinel
    /// sample, so the graph keeps scrolling.
    pub fn on_tick(&mut self) -> Option<Vec<DrawOp>> {
        self.on_tick_with_flags(0)
    }

    /// Tick with externally supplied throttle flags for the new sample.
    pub fn on_tick_with_flags(&mut self, flags: u32) -> Option<Vec<DrawOp>> {
        if self.stopped {
            return None;
        }
        let surface = self.surface?;
        let history = self.history.as_mut()?;

        let reading = self.registry.sample(self.config.threshold_policy());
        debug!(
            "tick: {}° ({:?}), flags {:#x}",
            reading.temperature, reading.level, flags
        );
        history.push(reading.temperature as f32 / 100.0, flags);
        self.last = Some(reading);

        Some(render(history, surface, &self.config))
    }

    /// Host layout change: derive the surface from the icon size, migrate
    /// the history, and re-render.
    pub fn on_resize(&mut self, icon_size: u32) -> Option<Vec<DrawOp>> {
        let height = icon_size.saturating_sub(BORDER_SIZE * 2);
        if height == 0 {
            return None;
        }
        let width = ((height * 3) / 2).max(MIN_SURFACE_WIDTH);
        let surface = SurfaceSize { width, height };
        self.surface = Some(surface);

        let history = self
            .history
            .get_or_insert_with(|| History::new(width as usize));
        if history.capacity() != width as usize {
            history.resize(width as usize);
        }

        Some(render(history, surface, &self.config))
    }

    /// Apply configuration from the host settings store.
    pub fn apply_settings(&mut self, settings: &HashMap<String, Value>) {
        self.config = WidgetConfig::from_settings(settings);
    }

    /// Write the current configuration back into the host settings store.
    pub fn write_settings(&self, settings: &mut HashMap<String, Value>) {
        self.config.write_settings(settings);
    }
}
