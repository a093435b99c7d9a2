use async_trait::async_trait;
use tracing::trace;

use crate::error::Result;
use crate::transport::SerialChannel;

/// Sink used by `--dry-run`: always open, accepts every record and keeps only a count.
#[derive(Debug, Default)]
pub struct DryRunChannel {
    open: bool,
    written: u64,
}

impl DryRunChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records accepted so far
    pub fn written(&self) -> u64 {
        self.written
    }
}

#[async_trait]
impl SerialChannel for DryRunChannel {
    fn is_open(&self) -> bool {
        self.open
    }

    async fn open(&mut self) -> Result<()> {
        self.open = true;
        Ok(())
    }

    async fn write(&mut self, record: &str) -> Result<()> {
        self.written += 1;
        trace!(record, "dry run, record dropped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::MetricsCore;
    use crate::counter::{Counter, MockCounter, MockCounterSource};
    use crate::meter::default_slots;
    use crate::record::WireFormat;
    use crate::transport::{LoopState, TransportLoop};

    #[tokio::test]
    async fn test_long_run_keeps_no_history() {
        let mut channel = DryRunChannel::new();
        channel.open().await.unwrap();
        for _ in 0..100_000 {
            channel.write("073075146K005;").await.unwrap();
        }
        assert_eq!(channel.written(), 100_000);
    }

    #[tokio::test]
    async fn test_drives_the_loop() {
        let mut source = MockCounterSource::new();
        source.expect_total_physical_memory().returning(|| Ok(16 * 1024 * 1024 * 1024));
        source.expect_category_exists().returning(|_| true);
        source.expect_counter_exists().returning(|_, _| true);
        source.expect_active_interface().returning(|| None);
        source.expect_open().returning(|_| {
            let mut counter = MockCounter::new();
            counter.expect_next_value().returning(|| Ok(50.0));
            Ok(Box::new(counter) as Box<dyn Counter>)
        });
        let core = MetricsCore::new(default_slots(), &source).unwrap();

        let mut transport =
            TransportLoop::new(core, DryRunChannel::new(), WireFormat::Canonical, Duration::from_millis(1));
        transport.tick().await.unwrap();
        transport.tick().await.unwrap();
        assert_eq!(transport.state(), LoopState::Streaming);
        assert_eq!(transport.channel().written(), 2);
    }
}
