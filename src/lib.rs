//! temp-graph: the sensor-sampling and history core of a panel temperature
//! widget.
//!
//! The host (a panel, an applet shell, a test harness) owns the timer, the
//! drawing surface, and the settings store. This crate owns everything
//! between: discovering thermal sensors across the Linux procfs/sysfs/hwmon
//! interfaces, sampling them on each tick, keeping a ring buffer of history
//! that survives live resizes, and turning that history into a deterministic
//! draw program the host can paint.

pub mod color;
pub mod config;
pub mod core;
pub mod history;
pub mod render;
pub mod sensors;

pub use color::Color;
pub use config::WidgetConfig;
pub use core::TempGraph;
pub use history::History;
pub use render::{DrawOp, SurfaceSize};
pub use sensors::{Reading, SensorRegistry, SensorRoots, WarningLevel};
