use std::collections::VecDeque;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::transport::SerialChannel;

/// In-memory channel with scripted failures for tests.
///
/// Every successful write is kept, so this is not meant for long runs; `--dry-run` uses
/// [`crate::transport::DryRunChannel`] instead.
///
/// Open and write attempts consume the next scripted outcome; once a script is exhausted every
/// further attempt succeeds.
#[derive(Debug, Default)]
pub struct FakeChannel {
    open: bool,
    open_script: VecDeque<Result<()>>,
    write_script: VecDeque<Result<()>>,
    open_attempts: usize,
    writes: Vec<String>,
}

impl FakeChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcomes for the next open attempts, in order.
    pub fn with_open_results(mut self, results: Vec<Result<()>>) -> Self {
        self.open_script = results.into();
        self
    }

    /// Outcomes for the next write attempts, in order.
    pub fn with_write_results(mut self, results: Vec<Result<()>>) -> Self {
        self.write_script = results.into();
        self
    }

    /// Simulates the device going away.
    pub fn disconnect(&mut self) {
        self.open = false;
    }

    pub fn open_attempts(&self) -> usize {
        self.open_attempts
    }

    /// Records written successfully, oldest first
    pub fn writes(&self) -> &[String] {
        &self.writes
    }
}

#[async_trait]
impl SerialChannel for FakeChannel {
    fn is_open(&self) -> bool {
        self.open
    }

    async fn open(&mut self) -> Result<()> {
        self.open_attempts += 1;
        self.open_script.pop_front().unwrap_or(Ok(()))?;
        self.open = true;
        Ok(())
    }

    async fn write(&mut self, record: &str) -> Result<()> {
        if !self.open {
            return Err(Error::serial("write on closed channel"));
        }
        self.write_script.pop_front().unwrap_or(Ok(()))?;
        self.writes.push(record.to_string());
        Ok(())
    }
}
