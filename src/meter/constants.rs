/// Number of meter slots carried by every record
pub const SLOT_COUNT: usize = 4;

/// Default delay between ticks of the transport loop (milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 900;

/// Default serial port name
pub const DEFAULT_PORT: &str = "COM4";

/// Default serial baud rate
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default blocking write timeout for the serial channel (milliseconds)
pub const DEFAULT_WRITE_TIMEOUT_MS: u64 = 1000;

/// Reference temperature that maps to a 100% TEMP gauge (degrees Celsius)
pub const TEMP_FULL_SCALE_CELSIUS: f64 = 70.0;

/// Counter category names
pub const CATEGORY_PROCESSOR: &str = "Processor";
pub const CATEGORY_MEMORY: &str = "Memory";
pub const CATEGORY_NETWORK: &str = "Network Interface";
pub const CATEGORY_DISK: &str = "PhysicalDisk";
pub const CATEGORY_THERMAL: &str = "Thermal Zone Information";

/// Counter names within their categories
pub const COUNTER_PROCESSOR_TIME: &str = "% Processor Time";
pub const COUNTER_AVAILABLE_MBYTES: &str = "Available MBytes";
pub const COUNTER_BYTES_TOTAL: &str = "Bytes Total/sec";
pub const COUNTER_IDLE_TIME: &str = "% Idle Time";
pub const COUNTER_TEMPERATURE: &str = "Temperature";

/// Fixed instance names
pub const INSTANCE_TOTAL: &str = "_Total";
pub const INSTANCE_FIRST_DISK: &str = "0 C:";
pub const INSTANCE_FIRST_THERMAL_ZONE: &str = "\\_TZ.THM0";
