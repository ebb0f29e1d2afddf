//! Shared constants for the widget core

use std::time::Duration;

/// Border the host paints around the drawing surface, in pixels per edge
pub const BORDER_SIZE: u32 = 2;

/// Low end of the bar scale, in degrees Celsius
pub const TEMP_LOW: f64 = 40.0;

/// Span of the bar scale above [`TEMP_LOW`], in degrees Celsius
pub const TEMP_RANGE: f64 = 50.0;

/// Hard cap on registered sensors; discoveries past this are dropped
pub const MAX_SENSORS: usize = 10;

/// Minimum surface width in pixels, and therefore minimum history depth
pub const MIN_SURFACE_WIDTH: u32 = 50;

/// Default sampling period for the update cycle
pub const UPDATE_INTERVAL: Duration = Duration::from_millis(1500);

/// Representative reading when the registry is empty or every read failed
pub const NO_READING: i32 = -273;

/// Throttle-flag bit: frequency capped
pub const FREQ_CAPPED_BIT: u32 = 0x2;

/// Throttle-flag bit: actively throttled
pub const THROTTLED_BIT: u32 = 0x4;
