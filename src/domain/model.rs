use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pauses applied around the transfer. Defaults reproduce the behavior the
/// bridge has always had against the reference firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub settle: Duration,
    pub char_delay: Duration,
    pub drain: Duration,
    pub read_timeout: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        use crate::config::defaults;
        Self {
            settle: Duration::from_millis(defaults::SETTLE_MS),
            char_delay: Duration::from_millis(defaults::CHAR_DELAY_MS),
            drain: Duration::from_millis(defaults::DRAIN_MS),
            read_timeout: Duration::from_millis(defaults::READ_TIMEOUT_MS),
        }
    }
}

/// How the receive phase decides it is done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReceiveMode {
    /// Drain only what the port reports as available; stop the first time the
    /// count is zero. Bytes arriving after that check are not captured.
    #[default]
    Snapshot,
    /// Keep polling until nothing new arrived for `quiet`, or `max` elapsed.
    Quiet { quiet: Duration, max: Duration },
}

/// Text read from the input file, sent one character per write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub text: String,
}

impl Payload {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransmitReport {
    pub chars_sent: usize,
    pub bytes_written: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveReport {
    pub bytes_read: usize,
    pub bytes_dropped: usize,
    pub text_bytes_written: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeSummary {
    pub started_at: String,
    pub uart0: String,
    pub uart1: String,
    pub baud: u32,
    pub input_path: String,
    pub output_path: String,
    pub transmit: TransmitReport,
    pub receive: ReceiveReport,
    pub elapsed_ms: u64,
}
