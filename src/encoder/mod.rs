//! # Metric encoding
//!
//! Maps one raw counter sample of a known [`MeterKind`] to a normalized [`Metric`]. Each kind has
//! its own pure encoding function, looked up by kind. Values outside `0..=999` are not clamped
//! here; the record formatter decides how they are rendered.
//!
//! ## Example
//!
//! ```rust
//! use m5_metrics::color::Rgb;
//! use m5_metrics::encoder::{encode, EncodeContext};
//! use m5_metrics::meter::{MeterKind, MeterSlot};
//!
//! let slot = MeterSlot::new(MeterKind::Cpu, 32, Rgb::from_name("Orange"));
//! let metric = encode(&slot, 73.4, &EncodeContext::new(16.0));
//! assert_eq!(metric.value, 73);
//! assert_eq!(metric.unit, "%");
//! ```

use serde::{Deserialize, Serialize};

use crate::meter::{MeterKind, MeterSlot, TEMP_FULL_SCALE_CELSIUS};
use crate::units::{human_rate, kelvin_to_celsius, mb_to_gb, round_to};

/// A normalized reading for one slot, rebuilt on every tick
///
/// Field names on the wire follow the display's JSON protocol.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metric {
    #[serde(rename = "Tit")]
    pub title: String,
    #[serde(rename = "Val")]
    pub value: i32,
    /// One character, or empty for an unbound slot
    #[serde(rename = "Unt")]
    pub unit: String,
    /// Fill level of the gauge, nominally in `0.0..=1.0`
    #[serde(rename = "Per")]
    pub fraction: f64,
    #[serde(rename = "Hue")]
    pub hue: i32,
    #[serde(rename = "Clr")]
    pub color_argb: i32,
}

/// Process-wide inputs shared by all encoders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeContext {
    /// Total physical memory in gigabytes, truncated to one decimal
    pub total_memory_gb: f64,
}

impl EncodeContext {
    pub fn new(total_memory_gb: f64) -> Self {
        Self { total_memory_gb }
    }
}

/// The kind-specific part of a [`Metric`]
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub value: i32,
    pub unit: &'static str,
    pub fraction: f64,
}

pub type EncodeFn = fn(f64, &EncodeContext) -> Reading;

// Indexed by `MeterKind::index`
const ENCODERS: [EncodeFn; 5] = [
    encode_percent,     // CPU
    encode_memory,      // MEM
    encode_rate,        // NET
    encode_percent,     // HDD, already inverted by the caller
    encode_temperature, // TEMP
];

/// Returns the encoding function for a kind.
pub fn encoder_for(kind: MeterKind) -> EncodeFn {
    ENCODERS[kind.index()]
}

/// Encodes a raw sample for the given slot.
///
/// `raw` must already be normalized with [`MeterKind::normalize_raw`].
pub fn encode(slot: &MeterSlot, raw: f64, ctx: &EncodeContext) -> Metric {
    let reading = encoder_for(slot.kind)(raw, ctx);
    Metric {
        title: slot.kind.as_str().to_string(),
        value: reading.value,
        unit: reading.unit.to_string(),
        fraction: reading.fraction,
        hue: slot.hue as i32,
        color_argb: slot.color.display_argb(),
    }
}

/// CPU and HDD: a percentage rendered as-is.
pub fn encode_percent(raw: f64, _ctx: &EncodeContext) -> Reading {
    Reading {
        value: raw.round() as i32,
        unit: "%",
        fraction: round_to(raw / 100.0, 3),
    }
}

/// MEM: `raw` is available megabytes; the gauge shows the used share of total memory.
pub fn encode_memory(raw: f64, ctx: &EncodeContext) -> Reading {
    let free_gb = mb_to_gb(raw);
    let total = ctx.total_memory_gb;
    let used_fraction = round_to((total - free_gb) / total, 3);
    Reading {
        value: (used_fraction * 100.0).round() as i32,
        unit: "G",
        fraction: used_fraction,
    }
}

/// NET: `raw` is bytes per second, scaled to below 1000 with a size suffix.
pub fn encode_rate(raw: f64, _ctx: &EncodeContext) -> Reading {
    let (scaled, suffix) = human_rate(raw, 0);
    Reading {
        value: scaled.round() as i32,
        unit: if suffix.is_empty() { " " } else { suffix },
        fraction: round_to(scaled / 1000.0, 3),
    }
}

/// TEMP: `raw` is Kelvin. The displayed value truncates toward zero.
///
/// The fraction is a whole-number percentage of [`TEMP_FULL_SCALE_CELSIUS`], which is what the
/// display expects for this kind.
pub fn encode_temperature(raw: f64, _ctx: &EncodeContext) -> Reading {
    let celsius = kelvin_to_celsius(raw);
    Reading {
        value: celsius.trunc() as i32,
        unit: " ",
        fraction: (celsius / TEMP_FULL_SCALE_CELSIUS * 100.0).round(),
    }
}
