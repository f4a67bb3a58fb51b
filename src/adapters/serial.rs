use crate::core::{PortOpener, SerialLink};
use crate::utils::error::{BridgeError, Result};
use serialport::SerialPort;
use std::io::{self, Read, Write};
use std::time::Duration;

/// Opens real devices through the `serialport` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialPortOpener;

impl PortOpener for SerialPortOpener {
    type Link = HardwareLink;

    fn open(&self, name: &str, baud: u32, read_timeout: Duration) -> Result<HardwareLink> {
        let port = serialport::new(name, baud)
            .timeout(read_timeout)
            .open()
            .map_err(|source| BridgeError::PortOpenError {
                port: name.to_string(),
                source,
            })?;

        tracing::debug!("Opened {} at {} baud, timeout {:?}", name, baud, read_timeout);
        Ok(HardwareLink {
            name: name.to_string(),
            port,
        })
    }
}

pub struct HardwareLink {
    name: String,
    port: Box<dyn SerialPort>,
}

impl HardwareLink {
    fn io_error(&self, source: io::Error) -> BridgeError {
        BridgeError::PortIoError {
            port: self.name.clone(),
            source,
        }
    }
}

impl SerialLink for HardwareLink {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.port.write_all(bytes).map_err(|e| self.io_error(e))
    }

    fn flush(&mut self) -> Result<()> {
        self.port.flush().map_err(|e| self.io_error(e))
    }

    fn bytes_available(&mut self) -> Result<u32> {
        self.port
            .bytes_to_read()
            .map_err(|source| BridgeError::SerialError {
                port: self.name.clone(),
                source,
            })
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        match self.port.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(ref e) if e.kind() == io::ErrorKind::TimedOut => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

impl Drop for HardwareLink {
    fn drop(&mut self) {
        tracing::debug!("Closing {}", self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_device_is_port_open_error() {
        let result = SerialPortOpener.open(
            "/dev/uart-bridge-does-not-exist",
            9600,
            Duration::from_millis(100),
        );
        match result {
            Err(BridgeError::PortOpenError { port, .. }) => {
                assert_eq!(port, "/dev/uart-bridge-does-not-exist")
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("opening a missing device should fail"),
        }
    }
}
