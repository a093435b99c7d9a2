//! Disk idle time derived from the kernel's cumulative I/O time.
//!
//! `/proc/diskstats` reports, per block device, the milliseconds spent doing I/O since boot.
//! The share of wall time between two samples that the device was busy is its utilisation;
//! the counter reports the complement, `% Idle Time`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::counter::Counter;
use crate::error::{Error, Result};

/// Column of `ms doing I/O` in a diskstats line (after major, minor and name)
const IO_TICKS_FIELD: usize = 12;

/// Device name prefixes that are never physical disks
const VIRTUAL_PREFIXES: [&str; 7] = ["loop", "ram", "zram", "sr", "fd", "dm-", "md"];

/// One device line of `/proc/diskstats`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskStat {
    pub name: String,
    pub io_ticks_ms: u64,
}

/// Parses every device line, skipping lines that are too short to carry I/O time.
pub fn parse_diskstats(contents: &str) -> Vec<DiskStat> {
    contents
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let name = fields.get(2)?;
            let io_ticks_ms = fields.get(IO_TICKS_FIELD)?.parse().ok()?;
            Some(DiskStat {
                name: (*name).to_string(),
                io_ticks_ms,
            })
        })
        .collect()
}

/// The first whole physical disk listed in diskstats.
///
/// Partitions are excluded by requiring a `<sysfs_root>/block/<name>` entry.
pub fn first_physical_disk(diskstats: &Path, sysfs_root: &Path) -> Option<String> {
    let contents = fs::read_to_string(diskstats).ok()?;
    parse_diskstats(&contents)
        .into_iter()
        .map(|stat| stat.name)
        .find(|name| {
            !VIRTUAL_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
                && sysfs_root.join("block").join(name).exists()
        })
}

/// `% Idle Time` of one block device
#[derive(Debug)]
pub struct DiskIdleCounter {
    diskstats: PathBuf,
    device: String,
    last: Option<(u64, Instant)>,
}

impl DiskIdleCounter {
    pub fn new(diskstats: PathBuf, device: impl Into<String>) -> Self {
        Self {
            diskstats,
            device: device.into(),
            last: None,
        }
    }

    fn read_io_ticks(&self) -> Result<u64> {
        let contents = fs::read_to_string(&self.diskstats)?;
        parse_diskstats(&contents)
            .into_iter()
            .find(|stat| stat.name == self.device)
            .map(|stat| stat.io_ticks_ms)
            .ok_or_else(|| Error::invalid_data(format!("device '{}' missing from diskstats", self.device)))
    }

    /// Samples against an explicit clock reading.
    ///
    /// The first sample has no interval to measure and reports the disk as fully idle.
    pub fn sample_at(&mut self, now: Instant) -> Result<f64> {
        let ticks = self.read_io_ticks()?;
        let idle = match self.last {
            Some((last_ticks, last_at)) => {
                let elapsed_ms = now.saturating_duration_since(last_at).as_secs_f64() * 1000.0;
                if elapsed_ms <= 0.0 {
                    100.0
                } else {
                    let busy = ticks.saturating_sub(last_ticks) as f64 / elapsed_ms * 100.0;
                    100.0 - busy.clamp(0.0, 100.0)
                }
            }
            None => 100.0,
        };
        self.last = Some((ticks, now));
        Ok(idle)
    }
}

impl Counter for DiskIdleCounter {
    fn next_value(&mut self) -> Result<f64> {
        self.sample_at(Instant::now())
    }
}
