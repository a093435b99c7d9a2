//! # Wire records
//!
//! One record is sent per tick. The canonical layout is fixed-width:
//!
//! ```text
//! <slot1:000><slot2:000><slot3:000><slot3 unit><slot4:000>;
//! ```
//!
//! Only slot 3 carries its unit character, so the record stays 14 characters long whatever kind
//! sits in slot 3. An unbound slot contributes `000` (and a blank unit when it is slot 3).
//!
//! Two alternate layouts are kept for displays running the richer firmware: a per-slot layout
//! using the `"1000000 "` sentinel for unbound slots, and a JSON array of metrics.


use serde::{Deserialize, Serialize};

use crate::encoder::Metric;
use crate::error::Result;
use crate::meter::SLOT_COUNT;

/// Terminator closing every record
pub const RECORD_TERMINATOR: char = ';';

/// Length of a canonical record whose values all fit in three digits
pub const CANONICAL_RECORD_LEN: usize = 14;

/// Per-slot filler for a slot with no live counter
pub const UNBOUND_SENTINEL: &str = "1000000 ";

/// Index of the slot whose unit is embedded in the canonical record
const UNIT_SLOT: usize = 2;

/// Record layout written to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireFormat {
    #[default]
    Canonical,
    PerSlot,
    Json,
}

/// Collects the metrics of one tick, in slot order, and renders them
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    slots: Vec<Option<Metric>>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(SLOT_COUNT),
        }
    }

    /// Appends the next slot; `None` marks an unbound slot.
    ///
    /// Slots past the fourth are ignored.
    pub fn append(&mut self, metric: Option<Metric>) -> &mut Self {
        if self.slots.len() < SLOT_COUNT {
            self.slots.push(metric);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot `index`, treating slots never appended as unbound
    fn slot(&self, index: usize) -> Option<&Metric> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn build(&self, format: WireFormat) -> Result<String> {
        match format {
            WireFormat::Canonical => Ok(self.build_canonical()),
            WireFormat::PerSlot => Ok(self.build_per_slot()),
            WireFormat::Json => self.build_json(),
        }
    }

    pub fn build_canonical(&self) -> String {
        let mut record = String::with_capacity(CANONICAL_RECORD_LEN);
        for index in 0..SLOT_COUNT {
            let metric = self.slot(index);
            record.push_str(&zero_pad3(metric.map_or(0, |m| m.value)));
            if index == UNIT_SLOT {
                record.push(metric.and_then(|m| m.unit.chars().next()).unwrap_or(' '));
            }
        }
        record.push(RECORD_TERMINATOR);
        record
    }

    pub fn build_per_slot(&self) -> String {
        let mut record = String::new();
        for index in 0..SLOT_COUNT {
            match self.slot(index) {
                Some(metric) => {
                    let percent = (metric.fraction * 100.0).round() as i32;
                    record.push_str(&format!(
                        "{}{}{}{}",
                        index + 1,
                        zero_pad3(metric.value),
                        zero_pad3(percent),
                        metric.unit
                    ));
                }
                None => record.push_str(UNBOUND_SENTINEL),
            }
        }
        record.push(RECORD_TERMINATOR);
        record
    }

    pub fn build_json(&self) -> Result<String> {
        let metrics: Vec<Metric> = (0..SLOT_COUNT).map(|index| self.slot(index).cloned().unwrap_or_default()).collect();
        let mut record = serde_json::to_string(&metrics)?;
        record.push(RECORD_TERMINATOR);
        Ok(record)
    }
}

/// Formats an integer as at least three zero-padded digits.
///
/// Wider values keep all their digits and negative values get a leading minus before the
/// three digits, so out-of-range readings lengthen the record instead of being clamped.
pub fn zero_pad3(value: i32) -> String {
    if value < 0 {
        format!("-{:03}", value.unsigned_abs())
    } else {
        format!("{value:03}")
    }
}
