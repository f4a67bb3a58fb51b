pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{serial::SerialPortOpener, storage::LocalStorage};
pub use config::toml_config::TomlConfig;
pub use crate::core::bridge::BridgeEngine;
pub use domain::model::{BridgeSummary, ReceiveMode, Timing};
pub use utils::error::{BridgeError, Result};
