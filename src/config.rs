//! Widget configuration and the host settings-store exchange
//!
//! The host hands us its key/value settings as a `HashMap<String, Value>`;
//! recognized keys are the color strings, the numeric-overlay toggle, and the
//! warning-threshold settings. Unknown keys are ignored and malformed values
//! fall back to the defaults.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub const KEY_FOREGROUND: &str = "Foreground";
pub const KEY_BACKGROUND: &str = "Background";
pub const KEY_THROTTLE1: &str = "Throttle1";
pub const KEY_THROTTLE2: &str = "Throttle2";
pub const KEY_SHOW_PERCENT: &str = "ShowPercent";
pub const KEY_AUTO_THRESHOLD: &str = "AutoThreshold";
pub const KEY_WARN_LOW: &str = "WarnLow";
pub const KEY_WARN_HIGH: &str = "WarnHigh";

/// How warning levels are derived from per-tick readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdPolicy {
    /// Fixed user-configured thresholds in whole degrees Celsius
    Fixed { low: i32, high: i32 },
    /// Derive from each sensor's critical trip point:
    /// `critical - 10` raises Low, `critical - 5` raises High
    PerSensorCritical,
}

/// Configuration for the temperature graph widget
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WidgetConfig {
    /// Bar color for samples with no throttle flags
    #[serde(default = "default_foreground")]
    pub foreground: Color,
    #[serde(default = "default_background")]
    pub background: Color,
    /// Bar color when the frequency-capped flag is set
    #[serde(default = "default_low_throttle")]
    pub low_throttle: Color,
    /// Bar color when the actively-throttled flag is set
    #[serde(default = "default_high_throttle")]
    pub high_throttle: Color,
    /// Draw the numeric temperature overlay
    #[serde(default = "default_true")]
    pub show_percent: bool,
    /// Use per-sensor critical trip points instead of the fixed thresholds
    #[serde(default)]
    pub auto_threshold: bool,
    #[serde(default = "default_warn_low")]
    pub warn_low: i32,
    #[serde(default = "default_warn_high")]
    pub warn_high: i32,
}

fn default_foreground() -> Color {
    // dark gray
    Color::from_rgba8(169, 169, 169, 255)
}

fn default_background() -> Color {
    // light gray
    Color::from_rgba8(211, 211, 211, 255)
}

fn default_low_throttle() -> Color {
    // orange
    Color::from_rgba8(255, 165, 0, 255)
}

fn default_high_throttle() -> Color {
    // red
    Color::from_rgba8(255, 0, 0, 255)
}

fn default_true() -> bool {
    true
}

fn default_warn_low() -> i32 {
    70
}

fn default_warn_high() -> i32 {
    80
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            foreground: default_foreground(),
            background: default_background(),
            low_throttle: default_low_throttle(),
            high_throttle: default_high_throttle(),
            show_percent: true,
            auto_threshold: false,
            warn_low: default_warn_low(),
            warn_high: default_warn_high(),
        }
    }
}

impl WidgetConfig {
    /// Build a configuration from the host settings store.
    ///
    /// Missing or malformed entries keep their defaults; a bad color string
    /// never fails the load.
    pub fn from_settings(settings: &HashMap<String, Value>) -> Self {
        let mut config = Self::default();
        if let Some(c) = color_setting(settings, KEY_FOREGROUND) {
            config.foreground = c;
        }
        if let Some(c) = color_setting(settings, KEY_BACKGROUND) {
            config.background = c;
        }
        if let Some(c) = color_setting(settings, KEY_THROTTLE1) {
            config.low_throttle = c;
        }
        if let Some(c) = color_setting(settings, KEY_THROTTLE2) {
            config.high_throttle = c;
        }
        if let Some(v) = int_setting(settings, KEY_SHOW_PERCENT) {
            config.show_percent = v != 0;
        }
        if let Some(v) = int_setting(settings, KEY_AUTO_THRESHOLD) {
            config.auto_threshold = v != 0;
        }
        if let Some(v) = int_setting(settings, KEY_WARN_LOW) {
            config.warn_low = v as i32;
        }
        if let Some(v) = int_setting(settings, KEY_WARN_HIGH) {
            config.warn_high = v as i32;
        }
        config
    }

    /// Write the current values back into the host settings store.
    pub fn write_settings(&self, settings: &mut HashMap<String, Value>) {
        settings.insert(KEY_FOREGROUND.into(), Value::from(self.foreground.to_hex()));
        settings.insert(KEY_BACKGROUND.into(), Value::from(self.background.to_hex()));
        settings.insert(KEY_THROTTLE1.into(), Value::from(self.low_throttle.to_hex()));
        settings.insert(KEY_THROTTLE2.into(), Value::from(self.high_throttle.to_hex()));
        settings.insert(KEY_SHOW_PERCENT.into(), Value::from(self.show_percent as i64));
        settings.insert(
            KEY_AUTO_THRESHOLD.into(),
            Value::from(self.auto_threshold as i64),
        );
        settings.insert(KEY_WARN_LOW.into(), Value::from(i64::from(self.warn_low)));
        settings.insert(KEY_WARN_HIGH.into(), Value::from(i64::from(self.warn_high)));
    }

    pub fn threshold_policy(&self) -> ThresholdPolicy {
        if self.auto_threshold {
            ThresholdPolicy::PerSensorCritical
        } else {
            ThresholdPolicy::Fixed {
                low: self.warn_low,
                high: self.warn_high,
            }
        }
    }
}

fn color_setting(settings: &HashMap<String, Value>, key: &str) -> Option<Color> {
    let s = settings.get(key)?.as_str()?;
    match Color::parse(s) {
        Ok(c) => Some(c),
        Err(e) => {
            log::debug!("ignoring bad {} value {:?}: {}", key, s, e);
            None
        }
    }
}

fn int_setting(settings: &HashMap<String, Value>, key: &str) -> Option<i64> {
    settings.get(key)?.as_i64()
}
