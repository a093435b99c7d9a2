//! # Counter sources
//!
//! A counter is a live numeric sensor identified by a category, a counter name and an instance
//! (for example `Processor / % Processor Time / _Total`). A [`CounterSource`] checks that a
//! counter exists on the host and opens it; the resulting [`CounterHandle`] is owned by exactly
//! one meter slot for the life of the process.
//!
//! Resolution failures for a missing category or counter are fatal. The one soft failure is the
//! network meter: when no interface is up, the slot is left unbound instead.

pub mod disk;
pub mod host;
pub mod interface;
pub mod thermal;

pub use host::HostCounterSource;
pub use interface::{Interface, InterfaceType};

use std::fmt;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::meter::*;

#[cfg(test)]
use mockall::automock;

/// Identity of one host counter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CounterPath {
    pub category: String,
    pub counter: String,
    pub instance: String,
}

impl CounterPath {
    pub fn new(category: impl Into<String>, counter: impl Into<String>, instance: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            counter: counter.into(),
            instance: instance.into(),
        }
    }

    /// The counter a meter kind reads. `interface` is only consulted for [`MeterKind::Net`].
    pub fn for_kind(kind: MeterKind, interface: &str) -> Self {
        match kind {
            MeterKind::Cpu => Self::new(CATEGORY_PROCESSOR, COUNTER_PROCESSOR_TIME, INSTANCE_TOTAL),
            MeterKind::Mem => Self::new(CATEGORY_MEMORY, COUNTER_AVAILABLE_MBYTES, ""),
            MeterKind::Net => Self::new(CATEGORY_NETWORK, COUNTER_BYTES_TOTAL, interface),
            MeterKind::Hdd => Self::new(CATEGORY_DISK, COUNTER_IDLE_TIME, INSTANCE_FIRST_DISK),
            MeterKind::Temp => Self::new(CATEGORY_THERMAL, COUNTER_TEMPERATURE, INSTANCE_FIRST_THERMAL_ZONE),
        }
    }
}

impl fmt::Display for CounterPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\{}({})\\{}", self.category, self.instance, self.counter)
    }
}

/// An opened counter that produces a fresh reading on every call
#[cfg_attr(test, automock)]
pub trait Counter: Send {
    /// Reads the instantaneous value. No caching or smoothing is applied.
    fn next_value(&mut self) -> Result<f64>;
}

/// Host capability to look up and open counters
#[cfg_attr(test, automock)]
pub trait CounterSource: Send + Sync {
    fn category_exists(&self, category: &str) -> bool;

    fn counter_exists(&self, category: &str, counter: &str) -> bool;

    /// Opens a counter whose category and name are known to exist.
    fn open(&self, path: &CounterPath) -> Result<Box<dyn Counter>>;

    /// Name of the first interface that is up and is neither loopback nor a tunnel.
    fn active_interface(&self) -> Option<String>;

    /// Total installed physical memory in bytes.
    fn total_physical_memory(&self) -> Result<u64>;
}

/// A live counter owned by one meter slot
///
/// Reads are serialized through an internal lock because the underlying counter objects are not
/// guaranteed to tolerate concurrent access.
pub struct CounterHandle {
    path: CounterPath,
    counter: Mutex<Box<dyn Counter>>,
}

impl CounterHandle {
    pub fn new(path: CounterPath, counter: Box<dyn Counter>) -> Self {
        Self {
            path,
            counter: Mutex::new(counter),
        }
    }

    pub fn path(&self) -> &CounterPath {
        &self.path
    }

    pub fn sample(&self) -> Result<f64> {
        self.counter.lock().next_value()
    }
}

impl fmt::Debug for CounterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CounterHandle").field("path", &self.path).finish_non_exhaustive()
    }
}

/// Resolves a meter kind to a live counter.
///
/// Returns `Ok(None)` when the kind cannot be bound on this host without that being an error
/// (currently only a network meter with no active interface).
pub fn resolve(source: &dyn CounterSource, kind: MeterKind) -> Result<Option<CounterHandle>> {
    let interface = match kind {
        MeterKind::Net => match source.active_interface() {
            Some(name) => name,
            None => {
                warn!("no active network interface; {kind} meter will be unbound");
                return Ok(None);
            }
        },
        _ => String::new(),
    };

    let path = CounterPath::for_kind(kind, &interface);
    open_counter(source, path).map(Some)
}

fn open_counter(source: &dyn CounterSource, path: CounterPath) -> Result<CounterHandle> {
    if !source.category_exists(&path.category) {
        return Err(Error::category_not_found(&path.category));
    }
    if !source.counter_exists(&path.category, &path.counter) {
        return Err(Error::counter_not_found(&path.category, &path.counter));
    }

    let counter = source.open(&path)?;
    info!(counter = %path, "counter opened");
    Ok(CounterHandle::new(path, counter))
}
