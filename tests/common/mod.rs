#![allow(dead_code)]

pub mod builders;

pub use builders::host::TestHostBuilder;
pub use builders::source::{StubCounterSource, TestSourceBuilder};

/// The canonical record for CPU 73.4, 4096 MB free of 16 GB, 150000 B/s and 95% disk idle
pub const REFERENCE_RECORD: &str = "073075146K005;";

pub const SIXTEEN_GB: u64 = 16 * 1024 * 1024 * 1024;
