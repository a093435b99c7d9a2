use std::fs;
use std::path::{Path, PathBuf};

use crate::counter::Counter;
use crate::error::{Error, Result};
use crate::units::KELVIN_OFFSET;

/// Maps an ACPI thermal zone instance such as `\_TZ.THM0` to its zone number.
pub fn zone_index(instance: &str) -> Option<u32> {
    let digits: String = instance
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().ok()
}

/// Directory holding the sysfs view of a thermal zone
pub fn zone_dir(sysfs_root: &Path, zone: u32) -> PathBuf {
    sysfs_root.join("class").join("thermal").join(format!("thermal_zone{zone}"))
}

/// Whether the host exposes at least one thermal zone.
pub fn any_zone(sysfs_root: &Path) -> bool {
    fs::read_dir(sysfs_root.join("class").join("thermal"))
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .any(|entry| entry.file_name().to_string_lossy().starts_with("thermal_zone"))
        })
        .unwrap_or(false)
}

/// Temperature of one thermal zone, reported in Kelvin like the ACPI counter it stands in for
#[derive(Debug)]
pub struct ThermalZoneCounter {
    temp_path: PathBuf,
}

impl ThermalZoneCounter {
    pub fn new(zone_dir: PathBuf) -> Self {
        Self {
            temp_path: zone_dir.join("temp"),
        }
    }
}

impl Counter for ThermalZoneCounter {
    fn next_value(&mut self) -> Result<f64> {
        let raw = fs::read_to_string(&self.temp_path)?;
        let millidegrees: i64 = raw
            .trim()
            .parse()
            .map_err(|_| Error::invalid_data(format!("unreadable thermal zone value '{}'", raw.trim())))?;
        Ok(millidegrees as f64 / 1000.0 + KELVIN_OFFSET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_zone_index() {
        assert_eq!(zone_index("\\_TZ.THM0"), Some(0));
        assert_eq!(zone_index("\\_TZ.THM12"), Some(12));
        assert_eq!(zone_index("_Total"), None);
    }

    #[test]
    fn test_reads_kelvin() {
        let tmp = tempdir().unwrap();
        assert!(!any_zone(tmp.path()));

        let dir = zone_dir(tmp.path(), 0);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("temp"), "45500\n").unwrap();
        assert!(any_zone(tmp.path()));

        let mut counter = ThermalZoneCounter::new(dir.clone());
        let kelvin = counter.next_value().unwrap();
        assert!((kelvin - 318.65).abs() < 1e-9);

        fs::write(dir.join("temp"), "garbage").unwrap();
        assert!(counter.next_value().is_err());
    }
}
