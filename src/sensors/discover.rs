//! Enumeration of candidate sensor locations for each backend
//!
//! Discovery only walks directories and collects paths; it never reads a
//! temperature. Entries are sorted by name so a fixed filesystem snapshot
//! always yields the same ordered candidate list.

use super::backend::Backend;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem roots probed during discovery
///
/// Defaults to the real kernel paths; tests point these at a scratch tree.
#[derive(Debug, Clone)]
pub struct SensorRoots {
    pub legacy: PathBuf,
    pub sysfs: PathBuf,
    pub hwmon: PathBuf,
}

impl Default for SensorRoots {
    fn default() -> Self {
        Self {
            legacy: PathBuf::from("/proc/acpi/thermal_zone"),
            sysfs: PathBuf::from("/sys/class/thermal"),
            hwmon: PathBuf::from("/sys/class/hwmon"),
        }
    }
}

pub(super) const SYSFS_ZONE_PREFIX: &str = "thermal_zone";

/// hwmon instances probed before giving up
const HWMON_INSTANCES: u32 = 4;

/// A sensor location found during discovery, not yet registered
#[derive(Debug, Clone)]
pub(super) struct Candidate {
    pub path: PathBuf,
    pub name: String,
    pub backend: Backend,
}

/// Directory entries sorted by file name, skipping dot entries.
fn sorted_entries(dir: &Path) -> Vec<(PathBuf, String)> {
    let Ok(entries) = fs::read_dir(dir) else {
        debug!("cannot scan {}", dir.display());
        return Vec::new();
    };
    let mut found: Vec<(PathBuf, String)> = entries
        .flatten()
        .filter_map(|e| {
            let name = e.file_name().into_string().ok()?;
            if name.starts_with('.') {
                return None;
            }
            Some((e.path(), name))
        })
        .collect();
    found.sort_by(|a, b| a.1.cmp(&b.1));
    found
}

/// Collect one candidate per thermal-zone subdirectory of `root`.
///
/// Used by the legacy backend (every subdirectory) and the sysfs backend
/// (only subdirectories whose name starts with `thermal_zone`).
pub(super) fn scan_thermal_zones(
    root: &Path,
    prefix: Option<&str>,
    backend: Backend,
    out: &mut Vec<Candidate>,
) {
    for (path, name) in sorted_entries(root) {
        if let Some(prefix) = prefix {
            if !name.starts_with(prefix) {
                continue;
            }
        }
        out.push(Candidate {
            path,
            name,
            backend,
        });
    }
}

/// Collect hwmon candidates: `hwmon{0..3}/device` first, falling back to the
/// `hwmon{0..3}` directory itself when `device` has no matching entries.
pub(super) fn scan_hwmon(root: &Path, out: &mut Vec<Candidate>) {
    for i in 0..HWMON_INSTANCES {
        let instance = root.join(format!("hwmon{}", i));
        if !scan_hwmon_dir(&instance.join("device"), out) {
            scan_hwmon_dir(&instance, out);
        }
    }
}

/// Scan one directory for `temp<N>_input` files; true if any were found.
fn scan_hwmon_dir(dir: &Path, out: &mut Vec<Candidate>) -> bool {
    let mut found = false;
    for (path, name) in sorted_entries(dir) {
        if !is_temp_input(&name) {
            continue;
        }
        let display_name = hwmon_label(dir, &name).unwrap_or_else(|| name.clone());
        out.push(Candidate {
            path,
            name: display_name,
            backend: Backend::Hwmon,
        });
        found = true;
    }
    found
}

/// Matches `temp<N>_input` with an all-digit index.
fn is_temp_input(name: &str) -> bool {
    name.strip_prefix("temp")
        .and_then(|rest| rest.strip_suffix("_input"))
        .is_some_and(|index| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
}

/// First line of the adjacent `temp<N>_label` file, trailing newline stripped.
fn hwmon_label(dir: &Path, input_name: &str) -> Option<String> {
    let label_name = input_name.replace("_input", "_label");
    let contents = fs::read_to_string(dir.join(label_name)).ok()?;
    let label = contents.lines().next()?.to_string();
    if label.is_empty() {
        None
    } else {
        Some(label)
    }
}
