pub mod bridge;
pub mod decoder;
pub mod transfer;

pub use crate::domain::model::{BridgeSummary, Payload, ReceiveMode, ReceiveReport, Timing, TransmitReport};
pub use crate::domain::ports::{ConfigProvider, PortOpener, SerialLink, Storage};
pub use crate::utils::error::Result;
