use crate::domain::model::{ReceiveMode, Timing};
use crate::utils::error::Result;
use std::io::Write;
use std::time::Duration;

/// One open end of a UART link. Dropping the value closes the port.
pub trait SerialLink: Send {
    fn name(&self) -> &str;
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    /// Bytes already buffered by the driver. Never blocks.
    fn bytes_available(&mut self) -> Result<u32>;
    /// Reads a single byte, `None` if the read timed out.
    fn read_byte(&mut self) -> Result<Option<u8>>;
}

pub trait PortOpener: Send + Sync {
    type Link: SerialLink;

    fn open(&self, name: &str, baud: u32, read_timeout: Duration) -> Result<Self::Link>;
}

pub trait Storage: Send + Sync {
    fn read_text(&self, path: &str) -> Result<String>;
    /// Creates the file, truncating any existing content.
    fn create(&self, path: &str) -> Result<Box<dyn Write + Send>>;
}

pub trait ConfigProvider: Send + Sync {
    fn uart0(&self) -> &str;
    fn uart1(&self) -> &str;
    fn baud(&self) -> u32;
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn timing(&self) -> Timing;
    fn receive_mode(&self) -> ReceiveMode;
}
