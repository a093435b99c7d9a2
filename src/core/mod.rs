//! # Metrics core
//!
//! [`MetricsCore`] owns everything the poll loop needs besides the serial channel: the four
//! configured slots, the counter bound to each, and the total physical memory used as the
//! denominator of the memory meter. It is built once at startup and either comes up complete or
//! not at all.

use tracing::{debug, info, warn};

use crate::counter::{resolve, CounterHandle, CounterSource};
use crate::encoder::{encode, EncodeContext, Metric};
use crate::error::{Error, Result};
use crate::meter::{MeterSlot, SLOT_COUNT};
use crate::record::{RecordBuilder, WireFormat};
use crate::units::bytes_to_gb;

/// A configured slot together with the counter it samples
#[derive(Debug)]
pub struct BoundSlot {
    slot: MeterSlot,
    handle: Option<CounterHandle>,
}

impl BoundSlot {
    pub fn new(slot: MeterSlot, handle: Option<CounterHandle>) -> Self {
        Self { slot, handle }
    }

    pub fn slot(&self) -> &MeterSlot {
        &self.slot
    }

    pub fn handle(&self) -> Option<&CounterHandle> {
        self.handle.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.handle.is_some()
    }

    /// Takes a fresh sample and encodes it.
    ///
    /// Unbound slots yield `None` without sampling. A failed read also yields `None`, so the slot
    /// renders as unbound for this tick only and the handle is sampled again on the next one.
    pub fn sample(&self, ctx: &EncodeContext) -> Option<Metric> {
        let handle = self.handle.as_ref()?;
        match handle.sample() {
            Ok(raw) => Some(encode(&self.slot, self.slot.kind.normalize_raw(raw), ctx)),
            Err(err) => {
                warn!(kind = %self.slot.kind, counter = %handle.path(), error = %err, "counter read failed");
                None
            }
        }
    }
}

/// Resolved slots plus process-wide encoding inputs
#[derive(Debug)]
pub struct MetricsCore {
    slots: Vec<BoundSlot>,
    context: EncodeContext,
}

impl MetricsCore {
    /// Resolves every slot against `source` and reads the total memory size.
    ///
    /// Any fatal resolution error aborts construction; handles opened for earlier slots are
    /// dropped with it.
    pub fn new(slots: [MeterSlot; SLOT_COUNT], source: &dyn CounterSource) -> Result<Self> {
        let total_memory_gb = bytes_to_gb(source.total_physical_memory()? as f64);
        if total_memory_gb <= 0.0 {
            return Err(Error::ZeroTotalMemory);
        }
        debug!(total_memory_gb, "total physical memory");

        let slots = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                let handle = resolve(source, slot.kind)?;
                info!(slot = index + 1, kind = %slot.kind, bound = handle.is_some(), "meter slot configured");
                Ok(BoundSlot::new(slot, handle))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            slots,
            context: EncodeContext::new(total_memory_gb),
        })
    }

    pub fn slots(&self) -> &[BoundSlot] {
        &self.slots
    }

    pub fn total_memory_gb(&self) -> f64 {
        self.context.total_memory_gb
    }

    /// Samples all slots in order, 1 through 4.
    pub fn sample_metrics(&self) -> Vec<Option<Metric>> {
        self.slots.iter().map(|slot| slot.sample(&self.context)).collect()
    }

    /// Samples all slots and renders this tick's record.
    pub fn record(&self, format: WireFormat) -> Result<String> {
        let mut builder = RecordBuilder::new();
        for metric in self.sample_metrics() {
            builder.append(metric);
        }
        builder.build(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::{Counter, MockCounter, MockCounterSource};
    use crate::meter::{default_slots, MeterKind};

    const SIXTEEN_GB: u64 = 16 * 1024 * 1024 * 1024;

    fn constant_counter(value: f64) -> Box<dyn Counter> {
        let mut counter = MockCounter::new();
        counter.expect_next_value().returning(move || Ok(value));
        Box::new(counter)
    }

    /// A host with every counter present; only `open` is left for the test to script.
    fn base_source(total_memory: u64, interface: Option<&'static str>) -> MockCounterSource {
        let mut source = MockCounterSource::new();
        source.expect_total_physical_memory().returning(move || Ok(total_memory));
        source.expect_category_exists().returning(|_| true);
        source.expect_counter_exists().returning(|_, _| true);
        source
            .expect_active_interface()
            .returning(move || interface.map(str::to_string));
        source
    }

    fn host(total_memory: u64, interface: Option<&'static str>) -> MockCounterSource {
        let mut source = base_source(total_memory, interface);
        source.expect_open().returning(|path| {
            let value = match path.category.as_str() {
                "Processor" => 73.4,
                "Memory" => 4096.0,
                "Network Interface" => 150_000.0,
                "PhysicalDisk" => 95.0,
                _ => 323.15,
            };
            Ok(constant_counter(value))
        });
        source
    }

    #[test]
    fn test_reference_record() {
        let core = MetricsCore::new(default_slots(), &host(SIXTEEN_GB, Some("eth0"))).unwrap();
        assert_eq!(core.total_memory_gb(), 16.0);
        assert!(core.slots().iter().all(BoundSlot::is_bound));
        assert_eq!(core.record(WireFormat::Canonical).unwrap(), "073075146K005;");
    }

    #[test]
    fn test_unbound_network_slot() {
        let core = MetricsCore::new(default_slots(), &host(SIXTEEN_GB, None)).unwrap();
        assert!(!core.slots()[2].is_bound());

        let metrics = core.sample_metrics();
        assert_eq!(metrics.len(), SLOT_COUNT);
        assert!(metrics[2].is_none());
        assert_eq!(core.record(WireFormat::Canonical).unwrap(), "073075000 005;");
    }

    #[test]
    fn test_zero_memory_is_fatal() {
        let err = MetricsCore::new(default_slots(), &host(0, Some("eth0"))).unwrap_err();
        assert!(matches!(err, Error::ZeroTotalMemory));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_construction_is_atomic() {
        let mut source = MockCounterSource::new();
        source.expect_total_physical_memory().returning(|| Ok(SIXTEEN_GB));
        source
            .expect_category_exists()
            .returning(|category| category != "Thermal Zone Information");
        source.expect_counter_exists().returning(|_, _| true);
        source.expect_open().returning(|_| Ok(constant_counter(1.0)));

        let mut slots = default_slots();
        slots[3].kind = MeterKind::Temp;
        slots[2].kind = MeterKind::Cpu;

        let err = MetricsCore::new(slots, &source).unwrap_err();
        assert!(matches!(err, Error::CategoryNotFound(_)));
    }

    #[test]
    fn test_each_slot_owns_its_handle() {
        let mut slots = default_slots();
        slots[1].kind = MeterKind::Cpu;

        let mut source = base_source(SIXTEEN_GB, Some("eth0"));
        source.expect_open().times(SLOT_COUNT).returning(|_| Ok(constant_counter(10.0)));

        let core = MetricsCore::new(slots, &source).unwrap();
        let cpu_paths: Vec<_> = core
            .slots()
            .iter()
            .filter(|bound| bound.slot().kind == MeterKind::Cpu)
            .map(|bound| bound.handle().unwrap().path().clone())
            .collect();
        assert_eq!(cpu_paths.len(), 2);
        assert_eq!(cpu_paths[0], cpu_paths[1]);
    }

    #[test]
    fn test_failed_read_blanks_only_that_slot() {
        let mut source = base_source(SIXTEEN_GB, Some("usb0"));
        source.expect_open().returning(|path| {
            if path.category == "Network Interface" {
                let mut counter = MockCounter::new();
                counter
                    .expect_next_value()
                    .times(2)
                    .returning(|| Err(Error::not_available("interface 'usb0' disappeared")));
                return Ok(Box::new(counter) as Box<dyn Counter>);
            }
            let value = match path.category.as_str() {
                "Processor" => 73.4,
                "Memory" => 4096.0,
                _ => 95.0,
            };
            Ok(constant_counter(value))
        });

        let core = MetricsCore::new(default_slots(), &source).unwrap();
        assert!(core.slots()[2].is_bound());
        assert!(core.sample_metrics()[2].is_none());
        assert_eq!(core.record(WireFormat::Canonical).unwrap(), "073075000 005;");
    }

    #[test]
    fn test_read_recovers_on_next_tick() {
        let mut source = base_source(SIXTEEN_GB, Some("eth0"));
        source.expect_open().returning(|path| {
            if path.category == "Processor" {
                let mut counter = MockCounter::new();
                let mut reads = 0;
                counter.expect_next_value().returning(move || {
                    reads += 1;
                    if reads == 1 {
                        Err(Error::not_available("counter went away"))
                    } else {
                        Ok(73.4)
                    }
                });
                return Ok(Box::new(counter) as Box<dyn Counter>);
            }
            let value = match path.category.as_str() {
                "Memory" => 4096.0,
                "Network Interface" => 150_000.0,
                _ => 95.0,
            };
            Ok(constant_counter(value))
        });

        let core = MetricsCore::new(default_slots(), &source).unwrap();
        assert_eq!(core.record(WireFormat::Canonical).unwrap(), "000075146K005;");
        assert_eq!(core.record(WireFormat::Canonical).unwrap(), "073075146K005;");
    }
}
