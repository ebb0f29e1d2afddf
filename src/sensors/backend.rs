//! Backend adapters for reading one value from a kernel thermal interface
//!
//! Each adapter is a pure read: path in, whole degrees Celsius out, `None`
//! when the file is missing or the expected content is absent. A failed read
//! never aborts a tick; the registry simply skips the sensor.

use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

const LEGACY_TEMP_FILE: &str = "temperature";
const LEGACY_TRIP_FILE: &str = "trip_points";
const LEGACY_TEMP_MARKER: &str = "temperature:";
const LEGACY_CRIT_MARKER: &str = "critical (S5):";

const SYSFS_TEMP_FILE: &str = "temp";
const SYSFS_TRIP_FILE: &str = "trip_point_0_temp";

const HWMON_INPUT_SUFFIX: &str = "_input";
const HWMON_CRIT_SUFFIX: &str = "_crit";
/// Plausible length range for the suffix-stripped hwmon path; anything
/// outside it is treated as "no critical value" without touching the disk.
const HWMON_CRIT_STEM_LEN: std::ops::RangeInclusive<usize> = 17..=94;

/// Which kernel interface a sensor is read through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// `/proc/acpi/thermal_zone/<zone>/` with free-text marker lines
    Legacy,
    /// `/sys/class/thermal/thermal_zone*/` with milli-degree files
    Sysfs,
    /// A single `temp<N>_input` file under `/sys/class/hwmon/`
    Hwmon,
}

impl Backend {
    /// Read the current temperature in whole degrees Celsius.
    ///
    /// For `Legacy` and `Sysfs` the path is the sensor directory; for
    /// `Hwmon` it is the `temp<N>_input` file itself.
    pub fn read_temperature(self, path: &Path) -> Option<i32> {
        match self {
            Backend::Legacy => {
                read_marker_line(&path.join(LEGACY_TEMP_FILE), LEGACY_TEMP_MARKER, true)
            }
            Backend::Sysfs => read_millidegrees(&path.join(SYSFS_TEMP_FILE), true),
            Backend::Hwmon => read_millidegrees(path, true),
        }
    }

    /// Read the critical trip point, if the backend exposes one.
    ///
    /// Absence is common and expected, so nothing is logged on failure.
    pub fn read_critical(self, path: &Path) -> Option<i32> {
        match self {
            Backend::Legacy => {
                read_marker_line(&path.join(LEGACY_TRIP_FILE), LEGACY_CRIT_MARKER, false)
            }
            Backend::Sysfs => read_millidegrees(&path.join(SYSFS_TRIP_FILE), false),
            Backend::Hwmon => read_millidegrees(&derive_crit_path(path)?, false),
        }
    }
}

/// Scan a legacy procfs file for the first line containing `marker` and
/// parse the integer that follows it.
///
/// The value sits after the marker, padded with spaces and trailed by a
/// three-character unit suffix (` C` plus the newline), e.g.
/// `"temperature:             45 C\n"`.
fn read_marker_line(path: &Path, marker: &str, warn_unreadable: bool) -> Option<i32> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => {
            if warn_unreadable {
                warn!("cannot open {}", path.display());
            }
            return None;
        }
    };
    // Keep line terminators: the unit suffix strip counts the newline.
    let line = contents.split_inclusive('\n').find(|l| l.contains(marker))?;
    let rest = &line[line.find(marker)? + marker.len()..];
    let rest = rest.trim_start_matches(' ');
    let value = rest.get(..rest.len().saturating_sub(3))?;
    value.parse().ok()
}

/// Read the first line of a sysfs-style file as milli-degrees and truncate
/// to whole degrees.
fn read_millidegrees(path: &Path, warn_unreadable: bool) -> Option<i32> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => {
            if warn_unreadable {
                warn!("cannot open {}", path.display());
            }
            return None;
        }
    };
    let line = contents.lines().next()?;
    let millidegrees: i64 = line.trim().parse().ok()?;
    Some((millidegrees / 1000) as i32)
}

/// Derive the `_crit` sibling of a hwmon `_input` file.
///
/// Only attempted when the suffix-stripped path length is plausible;
/// implausible paths yield `None` without any I/O.
pub(super) fn derive_crit_path(input: &Path) -> Option<PathBuf> {
    let stem = input.to_str()?.strip_suffix(HWMON_INPUT_SUFFIX)?;
    if !HWMON_CRIT_STEM_LEN.contains(&stem.len()) {
        return None;
    }
    Some(PathBuf::from(format!("{}{}", stem, HWMON_CRIT_SUFFIX)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) {
        let mut f = fs::File::create(dir.path().join(name)).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn legacy_parses_the_marker_line() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "temperature", "temperature:             45 C\n");
        assert_eq!(Backend::Legacy.read_temperature(dir.path()), Some(45));
    }

    #[test]
    fn legacy_skips_unrelated_lines() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "temperature",
            "state:                   ok\ntemperature:             61 C\n",
        );
        assert_eq!(Backend::Legacy.read_temperature(dir.path()), Some(61));
    }

    #[test]
    fn legacy_without_marker_is_no_reading() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "temperature", "state:                   ok\n");
        assert_eq!(Backend::Legacy.read_temperature(dir.path()), None);
    }

    #[test]
    fn legacy_missing_file_is_no_reading() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Backend::Legacy.read_temperature(dir.path()), None);
    }

    #[test]
    fn legacy_critical_from_trip_points() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "trip_points",
            "critical (S5):           105 C\npassive:                 95 C\n",
        );
        assert_eq!(Backend::Legacy.read_critical(dir.path()), Some(105));
    }

    #[test]
    fn sysfs_truncates_millidegrees() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "temp", "47999\n");
        assert_eq!(Backend::Sysfs.read_temperature(dir.path()), Some(47));
    }

    #[test]
    fn sysfs_critical_reads_trip_point_zero() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "trip_point_0_temp", "100000\n");
        assert_eq!(Backend::Sysfs.read_critical(dir.path()), Some(100));
    }

    #[test]
    fn hwmon_reads_the_input_file_directly() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "temp1_input", "53500\n");
        assert_eq!(
            Backend::Hwmon.read_temperature(&dir.path().join("temp1_input")),
            Some(53)
        );
    }

    #[test]
    fn hwmon_unparsable_input_is_no_reading() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "temp1_input", "garbage\n");
        assert_eq!(
            Backend::Hwmon.read_temperature(&dir.path().join("temp1_input")),
            None
        );
    }

    #[test]
    fn crit_path_replaces_the_input_suffix() {
        let input = Path::new("/sys/class/hwmon/hwmon0/temp1_input");
        assert_eq!(
            derive_crit_path(input),
            Some(PathBuf::from("/sys/class/hwmon/hwmon0/temp1_crit"))
        );
    }

    #[test]
    fn crit_path_rejects_implausible_lengths() {
        // stem "/sys/a/t1" is 9 chars, below the plausible minimum
        assert_eq!(derive_crit_path(Path::new("/sys/a/t1_input")), None);

        let long = format!("/sys/{}/temp1_input", "x".repeat(90));
        assert_eq!(derive_crit_path(Path::new(&long)), None);
    }

    #[test]
    fn crit_path_requires_the_input_suffix() {
        assert_eq!(
            derive_crit_path(Path::new("/sys/class/hwmon/hwmon0/temp1_label")),
            None
        );
    }
}
