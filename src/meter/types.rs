use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::Error;

/// The logical signal a meter slot displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MeterKind {
    /// Total processor utilisation in percent
    Cpu,
    /// Used physical memory in percent
    Mem,
    /// Combined send and receive rate of the active interface
    Net,
    /// Disk busy time in percent
    Hdd,
    /// First thermal zone temperature
    Temp,
}

impl MeterKind {
    pub const ALL: [MeterKind; 5] = [MeterKind::Cpu, MeterKind::Mem, MeterKind::Net, MeterKind::Hdd, MeterKind::Temp];

    pub fn as_str(self) -> &'static str {
        match self {
            MeterKind::Cpu => "CPU",
            MeterKind::Mem => "MEM",
            MeterKind::Net => "NET",
            MeterKind::Hdd => "HDD",
            MeterKind::Temp => "TEMP",
        }
    }

    /// Adjusts a raw counter reading before encoding.
    ///
    /// The disk counter reports idle time, so HDD meters display its complement.
    pub fn normalize_raw(self, raw: f64) -> f64 {
        match self {
            MeterKind::Hdd => 100.0 - raw,
            _ => raw,
        }
    }

    /// Position of this kind in per-kind lookup tables
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MeterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MeterKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::config(format!("unknown meter type '{s}' (expected CPU, MEM, NET, HDD or TEMP)")))
    }
}

/// Static configuration of one display slot; immutable once built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeterSlot {
    pub kind: MeterKind,
    pub hue: u8,
    pub color: Rgb,
}

impl MeterSlot {
    pub fn new(kind: MeterKind, hue: u8, color: Rgb) -> Self {
        Self { kind, hue, color }
    }
}
