//! m5-metrics - host telemetry for a small serial meter display
//!
//! This crate samples a handful of host counters on a fixed cadence and streams them to an
//! external display as one compact, fixed-width text record per tick.
//!
//! # Features
//!
//! - **Counters**: CPU load, available memory, network throughput, disk idle time and thermal
//!   zone temperature, each resolved once at startup
//! - **Encoding**: per-kind normalization into a value, a unit character and a gauge fraction
//! - **Records**: the canonical 14-character record, plus per-slot and JSON layouts
//! - **Transport**: a resilient poll/write loop over a serial port that survives unplugged or
//!   busy devices
//!
//! # Examples
//!
//! ```rust,no_run
//! use m5_metrics::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let settings = Settings::default();
//!     let core = MetricsCore::new(settings.slots()?, &HostCounterSource::new())?;
//!     let channel = SerialportChannel::new(&settings.channel.port, settings.channel.baud_rate, settings.write_timeout());
//!
//!     let mut transport = TransportLoop::new(core, channel, settings.wire_format, settings.poll_interval());
//!     let record = transport.tick().await?;
//!     println!("{record}");
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result`]. Startup errors such as a missing counter category
//! are fatal ([`Error::is_fatal`]); serial errors only fail the tick they happen on.
//!
//! ```rust
//! use m5_metrics::{Error, Result};
//!
//! fn check(err: &Error) -> bool {
//!     err.is_fatal()
//! }
//!
//! assert!(check(&Error::ZeroTotalMemory));
//! ```

pub mod color;
pub mod config;
pub mod core;
pub mod counter;
pub mod encoder;
pub mod error;
pub mod meter;
pub mod record;
pub mod transport;
pub mod units;

pub use error::{Error, Result};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::color::{HsvHue, Rgb};
    pub use crate::config::{ChannelSettings, Settings, SlotSettings};
    pub use crate::core::{BoundSlot, MetricsCore};
    pub use crate::counter::{CounterHandle, CounterPath, CounterSource, HostCounterSource};
    pub use crate::encoder::{EncodeContext, Metric};
    pub use crate::meter::{default_slots, MeterKind, MeterSlot};
    pub use crate::record::{RecordBuilder, WireFormat};
    pub use crate::transport::{
        DryRunChannel, FakeChannel, LoopState, SerialChannel, SerialportChannel, TransportLoop,
    };
    pub use crate::{Error, Result};
}
