use std::fs;
use std::path::Path;

use m5_metrics::counter::HostCounterSource;
use tempfile::TempDir;

/// Link-layer types as reported in `class/net/<if>/type`
pub const LINK_ETHER: u32 = 1;
pub const LINK_LOOPBACK: u32 = 772;
pub const LINK_NONE: u32 = 65534;

/// Builds a scratch sysfs/procfs tree for [`HostCounterSource::with_roots`]
pub struct TestHostBuilder {
    sys: TempDir,
    proc: TempDir,
}

impl TestHostBuilder {
    pub fn new() -> Self {
        Self {
            sys: TempDir::new().unwrap(),
            proc: TempDir::new().unwrap(),
        }
    }

    pub fn sys_path(&self) -> &Path {
        self.sys.path()
    }

    pub fn proc_path(&self) -> &Path {
        self.proc.path()
    }

    pub fn with_interface(self, name: &str, link_type: u32, operstate: &str, index: u32) -> Self {
        let dir = self.sys.path().join("class").join("net").join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("type"), format!("{link_type}\n")).unwrap();
        fs::write(dir.join("operstate"), format!("{operstate}\n")).unwrap();
        fs::write(dir.join("ifindex"), format!("{index}\n")).unwrap();
        self
    }

    pub fn with_wireless(self, name: &str) -> Self {
        let dir = self.sys.path().join("class").join("net").join(name).join("wireless");
        fs::create_dir_all(dir).unwrap();
        self
    }

    /// Adds a whole disk with the given cumulative I/O milliseconds.
    pub fn with_disk(self, name: &str, io_ticks_ms: u64) -> Self {
        fs::create_dir_all(self.sys.path().join("block").join(name)).unwrap();
        self.set_io_ticks(name, io_ticks_ms);
        self
    }

    pub fn set_io_ticks(&self, name: &str, io_ticks_ms: u64) {
        let line = format!("   8       0 {name} 100 0 800 50 20 0 160 10 0 {io_ticks_ms} 60 0 0 0 0\n");
        fs::write(self.proc.path().join("diskstats"), line).unwrap();
    }

    pub fn with_thermal_zone(self, zone: u32, millidegrees: i64) -> Self {
        let dir = self
            .sys
            .path()
            .join("class")
            .join("thermal")
            .join(format!("thermal_zone{zone}"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("temp"), format!("{millidegrees}\n")).unwrap();
        self
    }

    pub fn source(&self) -> HostCounterSource {
        HostCounterSource::with_roots(self.sys.path(), self.proc.path())
    }
}

impl Default for TestHostBuilder {
    fn default() -> Self {
        Self::new()
    }
}
