use std::io::{self, Write};
use std::time::Duration;

use async_trait::async_trait;
use serialport::SerialPort;
use tracing::debug;

use crate::error::{Error, Result};
use crate::transport::SerialChannel;

/// A serial port opened through the `serialport` crate
///
/// Writes run on tokio's blocking pool; the port moves into the blocking task and back.
pub struct SerialportChannel {
    port_name: String,
    baud_rate: u32,
    write_timeout: Duration,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialportChannel {
    pub fn new(port_name: impl Into<String>, baud_rate: u32, write_timeout: Duration) -> Self {
        Self {
            port_name: port_name.into(),
            baud_rate,
            write_timeout,
            port: None,
        }
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }
}

impl std::fmt::Debug for SerialportChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialportChannel")
            .field("port_name", &self.port_name)
            .field("baud_rate", &self.baud_rate)
            .field("open", &self.port.is_some())
            .finish()
    }
}

/// A timed-out write leaves the device attached; anything else means it is gone.
fn port_lost(err: &io::Error) -> bool {
    err.kind() != io::ErrorKind::TimedOut
}

#[async_trait]
impl SerialChannel for SerialportChannel {
    fn is_open(&self) -> bool {
        self.port.is_some()
    }

    async fn open(&mut self) -> Result<()> {
        let port_name = self.port_name.clone();
        let builder = serialport::new(port_name, self.baud_rate).timeout(self.write_timeout);
        let port = tokio::task::spawn_blocking(move || builder.open())
            .await
            .map_err(|err| Error::serial(format!("open task failed: {err}")))??;
        self.port = Some(port);
        Ok(())
    }

    async fn write(&mut self, record: &str) -> Result<()> {
        let mut port = self
            .port
            .take()
            .ok_or_else(|| Error::serial(format!("{} is not open", self.port_name)))?;
        let bytes = record.as_bytes().to_vec();

        let (port, result) = tokio::task::spawn_blocking(move || {
            let result = port.write_all(&bytes).and_then(|()| port.flush());
            (port, result)
        })
        .await
        .map_err(|err| Error::serial(format!("write task failed: {err}")))?;

        match result {
            Ok(()) => {
                self.port = Some(port);
                Ok(())
            }
            Err(err) => {
                if port_lost(&err) {
                    debug!(port = %self.port_name, error = %err, "serial port lost");
                } else {
                    self.port = Some(port);
                }
                Err(err.into())
            }
        }
    }
}
