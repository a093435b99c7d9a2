//! # Settings
//!
//! Startup configuration: the four meter slots, the serial channel and loop tuning. Settings
//! come from an optional TOML file; anything the file leaves out falls back to the factory
//! layout. The channel identity can then be overridden from the command line.
//!
//! ```toml
//! poll_interval_ms = 900
//! wire_format = "canonical"
//!
//! [channel]
//! port = "/dev/ttyUSB0"
//! baud_rate = 115200
//!
//! [[slots]]
//! kind = "CPU"
//! hue = 32
//! color = "Orange"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::meter::*;
use crate::record::WireFormat;

/// File read when no `--config` path is given, if it exists
pub const DEFAULT_CONFIG_FILE: &str = "m5-metrics.toml";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// One display slot as written in the settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSettings {
    /// `CPU`, `MEM`, `NET`, `HDD` or `TEMP`, in any case
    pub kind: String,
    pub hue: u32,
    /// A system colour name; unknown names give the empty colour
    #[serde(default)]
    pub color: String,
}

impl SlotSettings {
    pub fn new(kind: MeterKind, hue: u32, color: &str) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            hue,
            color: color.to_string(),
        }
    }

    pub fn meter_slot(&self) -> Result<MeterSlot> {
        let kind = self.kind.parse()?;
        let hue = u8::try_from(self.hue)
            .map_err(|_| Error::config(format!("hue {} is outside 0..=255", self.hue)))?;
        Ok(MeterSlot::new(kind, hue, Rgb::from_name(&self.color)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelSettings {
    pub port: String,
    pub baud_rate: u32,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub poll_interval_ms: u64,
    pub write_timeout_ms: u64,
    pub wire_format: WireFormat,
    pub log_level: String,
    pub channel: ChannelSettings,
    pub slots: Vec<SlotSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            write_timeout_ms: DEFAULT_WRITE_TIMEOUT_MS,
            wire_format: WireFormat::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            channel: ChannelSettings::default(),
            slots: vec![
                SlotSettings::new(MeterKind::Cpu, 32, "Orange"),
                SlotSettings::new(MeterKind::Mem, 224, "Magenta"),
                SlotSettings::new(MeterKind::Net, 160, "Cyan"),
                SlotSettings::new(MeterKind::Hdd, 224, "Yellow"),
            ],
        }
    }
}

impl Settings {
    /// Parses and validates a settings file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|err| Error::config(format!("cannot read {}: {err}", path.display())))?;
        let settings = Self::from_toml(&text)?;
        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads `path` when given, else [`DEFAULT_CONFIG_FILE`] when present, else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load(&fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.slots.len() != SLOT_COUNT {
            return Err(Error::config(format!(
                "expected exactly {SLOT_COUNT} slots, found {}",
                self.slots.len()
            )));
        }
        for slot in &self.slots {
            slot.meter_slot()?;
        }
        if self.poll_interval_ms == 0 {
            return Err(Error::config("poll_interval_ms must be greater than zero"));
        }
        Ok(())
    }

    /// Applies the positional `PORT BAUD` pair. Both must be present; a baud rate that is not a
    /// number becomes 0.
    pub fn apply_cli_override(&mut self, port: Option<&str>, baud_rate: Option<&str>) {
        if let (Some(port), Some(baud_rate)) = (port, baud_rate) {
            self.channel.port = port.to_string();
            self.channel.baud_rate = baud_rate.trim().parse().unwrap_or(0);
        }
    }

    pub fn slots(&self) -> Result<[MeterSlot; SLOT_COUNT]> {
        self.validate()?;
        let slots: Vec<MeterSlot> = self.slots.iter().map(SlotSettings::meter_slot).collect::<Result<_>>()?;
        slots
            .try_into()
            .map_err(|_| Error::config(format!("expected exactly {SLOT_COUNT} slots")))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }
}
