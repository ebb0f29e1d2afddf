//! Sensor registry: discovery, per-tick sampling, warning levels

pub mod backend;
mod discover;

pub use backend::Backend;
pub use discover::SensorRoots;

use crate::config::ThresholdPolicy;
use crate::core::constants::{MAX_SENSORS, NO_READING};
use discover::Candidate;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Offsets below a sensor's critical trip point that raise warnings
const CRIT_HIGH_OFFSET: i32 = 5;
const CRIT_LOW_OFFSET: i32 = 10;

/// A discovered sensor
///
/// Immutable once discovered; a re-discovery replaces the registry's whole
/// list rather than mutating sensors in place.
#[derive(Debug, Clone)]
pub struct Sensor {
    path: PathBuf,
    name: String,
    backend: Backend,
    /// Critical trip point, read once at discovery
    critical: Option<i32>,
}

impl Sensor {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn critical(&self) -> Option<i32> {
        self.critical
    }

    /// Read the current temperature; `None` when the sensor is unreadable.
    pub fn read(&self) -> Option<i32> {
        self.backend.read_temperature(&self.path)
    }
}

/// Warning severity for a tick; the worst level across sensors wins
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum WarningLevel {
    #[serde(rename = "none")]
    #[default]
    None,
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "high")]
    High,
}

/// Outcome of one sampling pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    /// Maximum temperature across all sensors, or -273 when nothing read
    pub temperature: i32,
    pub level: WarningLevel,
}

/// Ordered set of discovered sensors, capped at [`MAX_SENSORS`]
#[derive(Debug, Default)]
pub struct SensorRegistry {
    sensors: Vec<Sensor>,
}

impl SensorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover sensors under the real kernel paths.
    pub fn discover(&mut self) {
        self.discover_in(&SensorRoots::default());
    }

    /// Discover sensors under the given roots, replacing the current list.
    ///
    /// Backends are probed in priority order: the legacy procfs tree, then
    /// the sysfs thermal tree, and hwmon only when both came up empty.
    pub fn discover_in(&mut self, roots: &SensorRoots) {
        self.sensors.clear();

        let mut found = Vec::new();
        discover::scan_thermal_zones(&roots.legacy, None, Backend::Legacy, &mut found);
        discover::scan_thermal_zones(
            &roots.sysfs,
            Some(discover::SYSFS_ZONE_PREFIX),
            Backend::Sysfs,
            &mut found,
        );
        if found.is_empty() {
            discover::scan_hwmon(&roots.hwmon, &mut found);
        }

        for candidate in found {
            self.add(candidate);
        }
        info!("found {} sensors", self.sensors.len());
    }

    fn add(&mut self, candidate: Candidate) {
        if self.sensors.len() >= MAX_SENSORS {
            warn!(
                "too many sensors (max {}), ignoring {}",
                MAX_SENSORS,
                candidate.path.display()
            );
            return;
        }
        let critical = candidate.backend.read_critical(&candidate.path);
        info!("added sensor {}", candidate.path.display());
        self.sensors.push(Sensor {
            path: candidate.path,
            name: candidate.name,
            backend: candidate.backend,
            critical,
        });
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    /// Read every sensor once and aggregate.
    ///
    /// The representative temperature is the maximum reading; sensors that
    /// fail contribute nothing, and an empty or fully-failed pass reports the
    /// absolute-zero sentinel.
    pub fn sample(&self, policy: ThresholdPolicy) -> Reading {
        let mut max = NO_READING;
        let mut level = WarningLevel::None;
        for sensor in &self.sensors {
            let Some(current) = sensor.read() else {
                continue;
            };
            if current > max {
                max = current;
            }
            level = level.max(warning_for(current, sensor.critical, policy));
        }
        Reading {
            temperature: max,
            level,
        }
    }
}

fn warning_for(reading: i32, critical: Option<i32>, policy: ThresholdPolicy) -> WarningLevel {
    match policy {
        ThresholdPolicy::PerSensorCritical => match critical {
            Some(crit) if reading >= crit - CRIT_HIGH_OFFSET => WarningLevel::High,
            Some(crit) if reading >= crit - CRIT_LOW_OFFSET => WarningLevel::Low,
            _ => WarningLevel::None,
        },
        ThresholdPolicy::Fixed { low, high } => {
            if reading >= high {
                WarningLevel::High
            } else if reading >= low {
                WarningLevel::Low
            } else {
                WarningLevel::None
            }
        }
    }
}
