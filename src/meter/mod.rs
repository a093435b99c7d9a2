//! Meter slots and the kinds of signal they display.
//!
//! Every running instance drives exactly [`SLOT_COUNT`] slots, in display order.

pub mod constants;
pub mod types;

pub use constants::*;
pub use types::*;

use crate::color::{HsvHue, Rgb};

/// The factory slot layout: CPU, MEM, NET, HDD.
pub fn default_slots() -> [MeterSlot; SLOT_COUNT] {
    [
        MeterSlot::new(MeterKind::Cpu, HsvHue::Orange.value(), Rgb::from_name("Orange")),
        MeterSlot::new(MeterKind::Mem, HsvHue::Pink.value(), Rgb::from_name("Magenta")),
        MeterSlot::new(MeterKind::Net, HsvHue::Blue.value(), Rgb::from_name("Cyan")),
        MeterSlot::new(MeterKind::Hdd, HsvHue::Pink.value(), Rgb::from_name("Yellow")),
    ]
}
