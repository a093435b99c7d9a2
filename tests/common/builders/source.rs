use std::collections::{HashMap, HashSet, VecDeque};

use m5_metrics::counter::{Counter, CounterPath, CounterSource};
use m5_metrics::meter::*;
use m5_metrics::{Error, Result};

use super::super::SIXTEEN_GB;

/// Replays a fixed list of readings, repeating the last one forever
pub struct ScriptedCounter {
    readings: VecDeque<f64>,
    last: f64,
}

impl ScriptedCounter {
    pub fn new(readings: Vec<f64>) -> Self {
        Self {
            readings: readings.into(),
            last: 0.0,
        }
    }
}

impl Counter for ScriptedCounter {
    fn next_value(&mut self) -> Result<f64> {
        if let Some(next) = self.readings.pop_front() {
            self.last = next;
        }
        Ok(self.last)
    }
}

/// A host whose counters return canned readings
#[derive(Debug, Clone)]
pub struct StubCounterSource {
    readings: HashMap<&'static str, Vec<f64>>,
    missing_categories: HashSet<&'static str>,
    interface: Option<String>,
    total_memory: u64,
}

impl CounterSource for StubCounterSource {
    fn category_exists(&self, category: &str) -> bool {
        !self.missing_categories.contains(category)
    }

    fn counter_exists(&self, _category: &str, _counter: &str) -> bool {
        true
    }

    fn open(&self, path: &CounterPath) -> Result<Box<dyn Counter>> {
        let readings = self
            .readings
            .get(path.category.as_str())
            .cloned()
            .ok_or_else(|| Error::CategoryNotFound(path.category.clone()))?;
        Ok(Box::new(ScriptedCounter::new(readings)))
    }

    fn active_interface(&self) -> Option<String> {
        self.interface.clone()
    }

    fn total_physical_memory(&self) -> Result<u64> {
        Ok(self.total_memory)
    }
}

/// Builder for stub hosts; starts from the reference readings
pub struct TestSourceBuilder {
    source: StubCounterSource,
}

impl TestSourceBuilder {
    pub fn new() -> Self {
        let readings = HashMap::from([
            (CATEGORY_PROCESSOR, vec![73.4]),
            (CATEGORY_MEMORY, vec![4096.0]),
            (CATEGORY_NETWORK, vec![150_000.0]),
            (CATEGORY_DISK, vec![95.0]),
            (CATEGORY_THERMAL, vec![318.65]),
        ]);
        Self {
            source: StubCounterSource {
                readings,
                missing_categories: HashSet::new(),
                interface: Some("eth0".to_string()),
                total_memory: SIXTEEN_GB,
            },
        }
    }

    pub fn with_readings(mut self, category: &'static str, readings: Vec<f64>) -> Self {
        self.source.readings.insert(category, readings);
        self
    }

    pub fn without_interface(mut self) -> Self {
        self.source.interface = None;
        self
    }

    pub fn without_category(mut self, category: &'static str) -> Self {
        self.source.missing_categories.insert(category);
        self
    }

    pub fn with_total_memory(mut self, bytes: u64) -> Self {
        self.source.total_memory = bytes;
        self
    }

    pub fn build(self) -> StubCounterSource {
        self.source
    }
}

impl Default for TestSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
