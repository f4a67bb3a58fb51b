use crate::config::{defaults, timing_from_millis, validate_timing, ReceiveModeArg};
use crate::core::ConfigProvider;
use crate::domain::model::{ReceiveMode, Timing};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_port_name, validate_positive_number, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "uart-bridge")]
#[command(about = "Send a file out one serial port and capture what arrives on another")]
pub struct CliConfig {
    /// Port to transmit on
    #[arg(long)]
    pub uart0: String,

    /// Port to receive on
    #[arg(long)]
    pub uart1: String,

    /// Baud rate for both ports
    #[arg(long)]
    pub baud: u32,

    /// Text file whose contents are transmitted
    #[arg(long)]
    pub input: String,

    /// File where received text is written (overwritten)
    #[arg(long)]
    pub output: String,

    #[arg(long, default_value_t = defaults::SETTLE_MS, help = "Pause after opening the ports")]
    pub settle_ms: u64,

    #[arg(long, default_value_t = defaults::CHAR_DELAY_MS, help = "Pause after each character")]
    pub char_delay_ms: u64,

    #[arg(long, default_value_t = defaults::DRAIN_MS, help = "Pause before reading the receive port")]
    pub drain_ms: u64,

    #[arg(long, default_value_t = defaults::READ_TIMEOUT_MS)]
    pub read_timeout_ms: u64,

    #[arg(long, value_enum, default_value_t = ReceiveModeArg::Snapshot)]
    pub receive_mode: ReceiveModeArg,

    /// Quiet mode: stop after this long without new bytes
    #[arg(long, default_value_t = defaults::QUIET_MS)]
    pub quiet_ms: u64,

    /// Quiet mode: upper bound on the whole receive phase
    #[arg(long, default_value_t = defaults::RECEIVE_TIMEOUT_MS)]
    pub receive_timeout_ms: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Print the run summary as JSON on stdout")]
    pub summary_json: bool,
}

impl CliConfig {
    /// Configuration with every optional setting at its default.
    pub fn with_defaults(
        uart0: impl Into<String>,
        uart1: impl Into<String>,
        baud: u32,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            uart0: uart0.into(),
            uart1: uart1.into(),
            baud,
            input: input.into(),
            output: output.into(),
            settle_ms: defaults::SETTLE_MS,
            char_delay_ms: defaults::CHAR_DELAY_MS,
            drain_ms: defaults::DRAIN_MS,
            read_timeout_ms: defaults::READ_TIMEOUT_MS,
            receive_mode: ReceiveModeArg::Snapshot,
            quiet_ms: defaults::QUIET_MS,
            receive_timeout_ms: defaults::RECEIVE_TIMEOUT_MS,
            verbose: false,
            json_logs: false,
            summary_json: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn uart0(&self) -> &str {
        &self.uart0
    }

    fn uart1(&self) -> &str {
        &self.uart1
    }

    fn baud(&self) -> u32 {
        self.baud
    }

    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn timing(&self) -> Timing {
        timing_from_millis(
            self.settle_ms,
            self.char_delay_ms,
            self.drain_ms,
            self.read_timeout_ms,
        )
    }

    fn receive_mode(&self) -> ReceiveMode {
        self.receive_mode
            .resolve(self.quiet_ms, self.receive_timeout_ms)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_port_name("uart0", &self.uart0)?;
        validate_port_name("uart1", &self.uart1)?;
        validate_positive_number("baud", u64::from(self.baud), 1)?;
        validate_path("input", &self.input)?;
        validate_path("output", &self.output)?;
        validate_timing(&self.timing(), &self.receive_mode())
    }
}
