//! # Transport loop
//!
//! Drives the display: on every tick it samples all slots through the [`MetricsCore`], renders
//! the record, makes sure the serial channel is open and writes the record in one piece.
//!
//! The loop has two states. It starts [`LoopState::Idle`] and moves to
//! [`LoopState::Streaming`] once the channel opens. Open and write failures are reported as that
//! tick's result and retried on the next tick; they never stop the loop. A failed write leaves
//! the channel as it is, and the next tick's open check decides whether to reopen it.

pub mod dry_run;
pub mod fake;
pub mod serial;

pub use dry_run::DryRunChannel;
pub use fake::FakeChannel;
pub use serial::SerialportChannel;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::core::MetricsCore;
use crate::error::Result;
use crate::record::WireFormat;

#[cfg(test)]
use mockall::automock;

/// An exclusively owned, write-only link to the display
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SerialChannel: Send {
    fn is_open(&self) -> bool;

    async fn open(&mut self) -> Result<()>;

    /// Writes one complete record.
    ///
    /// The loop never closes the channel after a failed write. An implementation may still
    /// report `is_open() == false` afterwards when the device itself is gone (see
    /// [`SerialportChannel`]); the next tick then reopens it.
    async fn write(&mut self, record: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Channel closed or never opened
    Idle,
    /// Channel open, records flowing
    Streaming,
}

pub struct TransportLoop<C: SerialChannel> {
    core: MetricsCore,
    channel: C,
    format: WireFormat,
    poll_interval: Duration,
    state: LoopState,
    ticks: u64,
}

impl<C: SerialChannel> TransportLoop<C> {
    pub fn new(core: MetricsCore, channel: C, format: WireFormat, poll_interval: Duration) -> Self {
        Self {
            core,
            channel,
            format,
            poll_interval,
            state: LoopState::Idle,
            ticks: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Number of ticks run so far, successful or not
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Runs one poll cycle and returns the record written.
    pub async fn tick(&mut self) -> Result<String> {
        self.ticks += 1;
        let record = self.core.record(self.format)?;
        self.ensure_open().await?;
        self.channel.write(&record).await?;
        debug!(tick = self.ticks, record = %record, "record written");
        Ok(record)
    }

    async fn ensure_open(&mut self) -> Result<()> {
        if self.state == LoopState::Streaming && self.channel.is_open() {
            return Ok(());
        }

        self.state = LoopState::Idle;
        self.channel.open().await?;
        self.state = LoopState::Streaming;
        info!("serial channel open");
        Ok(())
    }

    /// Ticks until `shutdown` resolves, handing every tick's result to `report`.
    ///
    /// `shutdown` is only polled while waiting between ticks, so a tick that has started always
    /// finishes its write.
    pub async fn run_until<F, R>(&mut self, shutdown: F, mut report: R)
    where
        F: Future,
        R: FnMut(&Result<String>),
    {
        tokio::pin!(shutdown);
        loop {
            let result = self.tick().await;
            if let Err(err) = &result {
                warn!(tick = self.ticks, error = %err, "tick failed");
            }
            report(&result);

            tokio::select! {
                _ = &mut shutdown => {
                    info!(ticks = self.ticks, "transport loop stopped");
                    return;
                }
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }
    }
}
