#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot find counter category: {0}")]
    CategoryNotFound(String),

    #[error("cannot find counter '{counter}' in category '{category}'")]
    CounterNotFound { category: String, counter: String },

    #[error("cannot find instance '{instance}' in category '{category}'")]
    InstanceNotFound { category: String, instance: String },

    #[error("total physical memory reported as zero")]
    ZeroTotalMemory,

    #[error("Serial error: {0}")]
    Serial(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Feature not available: {0}")]
    NotAvailable(String),
}

impl Error {
    pub(crate) fn category_not_found<S: Into<String>>(category: S) -> Self {
        Error::CategoryNotFound(category.into())
    }

    pub(crate) fn counter_not_found<C: Into<String>, N: Into<String>>(category: C, counter: N) -> Self {
        Error::CounterNotFound {
            category: category.into(),
            counter: counter.into(),
        }
    }

    pub(crate) fn instance_not_found<C: Into<String>, I: Into<String>>(category: C, instance: I) -> Self {
        Error::InstanceNotFound {
            category: category.into(),
            instance: instance.into(),
        }
    }

    pub(crate) fn serial<S: Into<String>>(msg: S) -> Self {
        Error::Serial(msg.into())
    }

    pub(crate) fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub(crate) fn invalid_data<S: Into<String>>(msg: S) -> Self {
        Error::InvalidData(msg.into())
    }

    pub(crate) fn not_available<S: Into<String>>(msg: S) -> Self {
        Error::NotAvailable(msg.into())
    }

    /// Returns true for errors that must abort startup instead of being retried on the next tick.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::CategoryNotFound(_)
                | Error::CounterNotFound { .. }
                | Error::InstanceNotFound { .. }
                | Error::ZeroTotalMemory
                | Error::Config(_)
        )
    }
}

impl From<serialport::Error> for Error {
    fn from(err: serialport::Error) -> Self {
        Error::serial(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::invalid_data(err.to_string())
    }
}

/// Result type for m5-metrics operations
pub type Result<T> = std::result::Result<T, Error>;
