#[cfg(feature = "cli")]
pub mod cli;
pub mod defaults;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::domain::model::{ReceiveMode, Timing};
use crate::utils::error::Result;
use crate::utils::validation::validate_range;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Receive strategy as it is spelled on the command line and in profiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ReceiveModeArg {
    #[default]
    Snapshot,
    Quiet,
}

impl ReceiveModeArg {
    pub fn resolve(self, quiet_ms: u64, receive_timeout_ms: u64) -> ReceiveMode {
        match self {
            Self::Snapshot => ReceiveMode::Snapshot,
            Self::Quiet => ReceiveMode::Quiet {
                quiet: Duration::from_millis(quiet_ms),
                max: Duration::from_millis(receive_timeout_ms),
            },
        }
    }
}

pub(crate) fn timing_from_millis(
    settle_ms: u64,
    char_delay_ms: u64,
    drain_ms: u64,
    read_timeout_ms: u64,
) -> Timing {
    Timing {
        settle: Duration::from_millis(settle_ms),
        char_delay: Duration::from_millis(char_delay_ms),
        drain: Duration::from_millis(drain_ms),
        read_timeout: Duration::from_millis(read_timeout_ms),
    }
}

/// Checks shared by every configuration source.
pub(crate) fn validate_timing(timing: &Timing, mode: &ReceiveMode) -> Result<()> {
    let max = defaults::MAX_DELAY_MS;
    let millis = |d: &Duration| d.as_millis() as u64;

    validate_range("settle_ms", millis(&timing.settle), 0, max)?;
    validate_range("char_delay_ms", millis(&timing.char_delay), 0, max)?;
    validate_range("drain_ms", millis(&timing.drain), 0, max)?;
    validate_range("read_timeout_ms", millis(&timing.read_timeout), 1, max)?;

    if let ReceiveMode::Quiet { quiet, max: limit } = mode {
        validate_range("receive_timeout_ms", millis(limit), 1, max)?;
        // 靜默窗口不能超過整體上限
        validate_range("quiet_ms", millis(quiet), 1, millis(limit))?;
    }

    Ok(())
}
