//! Counters backed by the running host.
//!
//! Processor, memory and network counters come from `sysinfo`. Disk idle time and thermal zones
//! are read from procfs and sysfs, whose roots are configurable so tests can point them at a
//! scratch directory.

use std::path::PathBuf;
use std::time::Instant;

use sysinfo::{Networks, System};
use tracing::debug;

use crate::counter::interface::{self, InterfaceType};
use crate::counter::{disk, thermal, Counter, CounterPath, CounterSource};
use crate::error::{Error, Result};
use crate::meter::*;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Every (category, counter) pair this source can open
const KNOWN_COUNTERS: [(&str, &str); 5] = [
    (CATEGORY_PROCESSOR, COUNTER_PROCESSOR_TIME),
    (CATEGORY_MEMORY, COUNTER_AVAILABLE_MBYTES),
    (CATEGORY_NETWORK, COUNTER_BYTES_TOTAL),
    (CATEGORY_DISK, COUNTER_IDLE_TIME),
    (CATEGORY_THERMAL, COUNTER_TEMPERATURE),
];

/// [`CounterSource`] for the machine the process runs on
#[derive(Debug, Clone)]
pub struct HostCounterSource {
    sysfs_root: PathBuf,
    procfs_root: PathBuf,
}

impl HostCounterSource {
    pub fn new() -> Self {
        Self::with_roots("/sys", "/proc")
    }

    pub fn with_roots(sysfs_root: impl Into<PathBuf>, procfs_root: impl Into<PathBuf>) -> Self {
        Self {
            sysfs_root: sysfs_root.into(),
            procfs_root: procfs_root.into(),
        }
    }

    fn diskstats(&self) -> PathBuf {
        self.procfs_root.join("diskstats")
    }

    fn open_disk(&self, instance: &str) -> Result<disk::DiskIdleCounter> {
        let device = if instance == INSTANCE_FIRST_DISK {
            disk::first_physical_disk(&self.diskstats(), &self.sysfs_root)
        } else {
            Some(instance.to_string())
        };
        let device = device.ok_or_else(|| Error::instance_not_found(CATEGORY_DISK, instance))?;
        debug!(device = %device, "disk idle counter bound");
        Ok(disk::DiskIdleCounter::new(self.diskstats(), device))
    }

    fn open_thermal(&self, instance: &str) -> Result<thermal::ThermalZoneCounter> {
        let dir = thermal::zone_index(instance)
            .map(|zone| thermal::zone_dir(&self.sysfs_root, zone))
            .filter(|dir| dir.exists())
            .ok_or_else(|| Error::instance_not_found(CATEGORY_THERMAL, instance))?;
        Ok(thermal::ThermalZoneCounter::new(dir))
    }

    /// Interface selection for hosts without `/sys/class/net`: names only, in sorted order.
    fn fallback_interface(&self) -> Option<String> {
        let networks = Networks::new_with_refreshed_list();
        let mut names: Vec<&String> = networks
            .list()
            .iter()
            .filter(|(_, data)| data.total_received() + data.total_transmitted() > 0)
            .map(|(name, _)| name)
            .collect();
        names.sort();
        names
            .into_iter()
            .find(|name| !matches!(InterfaceType::from_name(name), InterfaceType::Loopback | InterfaceType::Tunnel))
            .cloned()
    }
}

impl Default for HostCounterSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterSource for HostCounterSource {
    fn category_exists(&self, category: &str) -> bool {
        match category {
            CATEGORY_PROCESSOR | CATEGORY_MEMORY | CATEGORY_NETWORK => sysinfo::IS_SUPPORTED_SYSTEM,
            CATEGORY_DISK => self.diskstats().exists(),
            CATEGORY_THERMAL => thermal::any_zone(&self.sysfs_root),
            _ => false,
        }
    }

    fn counter_exists(&self, category: &str, counter: &str) -> bool {
        KNOWN_COUNTERS
            .iter()
            .any(|(known_category, known_counter)| *known_category == category && *known_counter == counter)
    }

    fn open(&self, path: &CounterPath) -> Result<Box<dyn Counter>> {
        match path.category.as_str() {
            CATEGORY_PROCESSOR if path.instance == INSTANCE_TOTAL => Ok(Box::new(CpuCounter::new())),
            CATEGORY_PROCESSOR => Err(Error::instance_not_found(CATEGORY_PROCESSOR, &path.instance)),
            CATEGORY_MEMORY => Ok(Box::new(MemoryCounter::new())),
            CATEGORY_NETWORK => Ok(Box::new(NetworkCounter::open(&path.instance)?)),
            CATEGORY_DISK => Ok(Box::new(self.open_disk(&path.instance)?)),
            CATEGORY_THERMAL => Ok(Box::new(self.open_thermal(&path.instance)?)),
            other => Err(Error::category_not_found(other)),
        }
    }

    fn active_interface(&self) -> Option<String> {
        if self.sysfs_root.join("class").join("net").is_dir() {
            interface::active_interface_name(&self.sysfs_root)
        } else {
            self.fallback_interface()
        }
    }

    fn total_physical_memory(&self) -> Result<u64> {
        let mut system = System::new();
        system.refresh_memory();
        Ok(system.total_memory())
    }
}

/// `Processor / % Processor Time / _Total`
pub struct CpuCounter {
    system: System,
}

impl CpuCounter {
    pub fn new() -> Self {
        let mut system = System::new();
        // Usage is computed between refreshes; prime the baseline
        system.refresh_cpu_usage();
        Self { system }
    }
}

impl Default for CpuCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Counter for CpuCounter {
    fn next_value(&mut self) -> Result<f64> {
        self.system.refresh_cpu_usage();
        Ok(self.system.global_cpu_usage() as f64)
    }
}

/// `Memory / Available MBytes`
pub struct MemoryCounter {
    system: System,
}

impl MemoryCounter {
    pub fn new() -> Self {
        Self { system: System::new() }
    }
}

impl Default for MemoryCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Counter for MemoryCounter {
    fn next_value(&mut self) -> Result<f64> {
        self.system.refresh_memory();
        Ok((self.system.available_memory() / BYTES_PER_MB) as f64)
    }
}

/// `Network Interface / Bytes Total/sec` for one named interface
pub struct NetworkCounter {
    networks: Networks,
    interface: String,
    last_refresh: Instant,
}

impl NetworkCounter {
    pub fn open(interface: &str) -> Result<Self> {
        let networks = Networks::new_with_refreshed_list();
        if !networks.list().contains_key(interface) {
            return Err(Error::instance_not_found(CATEGORY_NETWORK, interface));
        }
        Ok(Self {
            networks,
            interface: interface.to_string(),
            last_refresh: Instant::now(),
        })
    }
}

impl Counter for NetworkCounter {
    fn next_value(&mut self) -> Result<f64> {
        self.networks.refresh(true);
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refresh).as_secs_f64();
        self.last_refresh = now;

        let data = self
            .networks
            .list()
            .get(&self.interface)
            .ok_or_else(|| Error::not_available(format!("interface '{}' disappeared", self.interface)))?;
        let bytes = data.received() + data.transmitted();
        if elapsed <= 0.0 {
            return Ok(0.0);
        }
        Ok(bytes as f64 / elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_known_counters() {
        let source = HostCounterSource::with_roots("/nonexistent/sys", "/nonexistent/proc");
        assert!(source.counter_exists(CATEGORY_PROCESSOR, COUNTER_PROCESSOR_TIME));
        assert!(source.counter_exists(CATEGORY_DISK, COUNTER_IDLE_TIME));
        assert!(!source.counter_exists(CATEGORY_PROCESSOR, COUNTER_IDLE_TIME));
        assert!(!source.category_exists("GPU Engine"));
        assert!(!source.category_exists(CATEGORY_DISK));
        assert!(!source.category_exists(CATEGORY_THERMAL));
    }

    #[test]
    fn test_unknown_category_cannot_be_opened() {
        let source = HostCounterSource::with_roots("/nonexistent/sys", "/nonexistent/proc");
        let path = CounterPath::new("GPU Engine", "Utilization Percentage", "");
        assert!(matches!(source.open(&path), Err(Error::CategoryNotFound(_))));

        let path = CounterPath::new(CATEGORY_PROCESSOR, COUNTER_PROCESSOR_TIME, "3");
        assert!(matches!(source.open(&path), Err(Error::InstanceNotFound { .. })));
    }

    #[test]
    fn test_disk_and_thermal_from_scratch_roots() {
        let sys = tempdir().unwrap();
        let proc = tempdir().unwrap();
        fs::write(
            proc.path().join("diskstats"),
            "   8       0 sda 1 0 1 1 1 0 1 1 0 250 1 0 0 0 0\n",
        )
        .unwrap();
        fs::create_dir_all(sys.path().join("block").join("sda")).unwrap();
        let zone = thermal::zone_dir(sys.path(), 0);
        fs::create_dir_all(&zone).unwrap();
        fs::write(zone.join("temp"), "50000\n").unwrap();

        let source = HostCounterSource::with_roots(sys.path(), proc.path());
        assert!(source.category_exists(CATEGORY_DISK));
        assert!(source.category_exists(CATEGORY_THERMAL));

        let mut disk = source.open(&CounterPath::for_kind(MeterKind::Hdd, "")).unwrap();
        assert_eq!(disk.next_value().unwrap(), 100.0);

        let mut temp = source.open(&CounterPath::for_kind(MeterKind::Temp, "")).unwrap();
        assert!((temp.next_value().unwrap() - 323.15).abs() < 1e-9);

        let missing = CounterPath::new(CATEGORY_THERMAL, COUNTER_TEMPERATURE, "\\_TZ.THM7");
        assert!(matches!(source.open(&missing), Err(Error::InstanceNotFound { .. })));
    }

    #[test]
    fn test_active_interface_prefers_sysfs() {
        let sys = tempdir().unwrap();
        let eth = sys.path().join("class").join("net").join("eth0");
        fs::create_dir_all(&eth).unwrap();
        fs::write(eth.join("type"), "1\n").unwrap();
        fs::write(eth.join("operstate"), "up\n").unwrap();
        fs::write(eth.join("ifindex"), "2\n").unwrap();

        let source = HostCounterSource::with_roots(sys.path(), "/nonexistent/proc");
        assert_eq!(source.active_interface().as_deref(), Some("eth0"));

        fs::write(eth.join("operstate"), "down\n").unwrap();
        assert_eq!(source.active_interface(), None);
    }
}
