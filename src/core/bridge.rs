use crate::core::transfer::{receive, transmit};
use crate::core::{ConfigProvider, PortOpener, Storage};
use crate::domain::model::{BridgeSummary, Payload};
use crate::utils::error::Result;
use tokio::time::{sleep, Instant};

/// Runs one transfer: open both ports, send the input file on `uart0`,
/// capture whatever `uart1` has into the output file.
///
/// Both links are owned by `run` and dropped on every return path, so a failed
/// run never leaves a device open.
pub struct BridgeEngine<O: PortOpener, S: Storage, C: ConfigProvider> {
    opener: O,
    storage: S,
    config: C,
}

impl<O: PortOpener, S: Storage, C: ConfigProvider> BridgeEngine<O, S, C> {
    pub fn new(opener: O, storage: S, config: C) -> Self {
        Self {
            opener,
            storage,
            config,
        }
    }

    pub async fn run(&self) -> Result<BridgeSummary> {
        let started_at = chrono::Utc::now();
        let clock = Instant::now();
        let timing = self.config.timing();
        let baud = self.config.baud();

        tracing::info!(
            "Opening {} (tx) and {} (rx) at {} baud",
            self.config.uart0(),
            self.config.uart1(),
            baud
        );
        let mut tx = self
            .opener
            .open(self.config.uart0(), baud, timing.read_timeout)?;
        let mut rx = self
            .opener
            .open(self.config.uart1(), baud, timing.read_timeout)?;

        tracing::debug!("Waiting {:?} for the ports to settle", timing.settle);
        sleep(timing.settle).await;

        let payload = Payload::new(self.storage.read_text(self.config.input_path())?);
        tracing::info!(
            "Transmitting {} character(s) from {}",
            payload.char_count(),
            self.config.input_path()
        );
        let transmit_report = transmit(&mut tx, &payload, timing.char_delay).await?;

        tracing::debug!("Waiting {:?} for the remote end to answer", timing.drain);
        sleep(timing.drain).await;

        let mut out = self.storage.create(self.config.output_path())?;
        let receive_report = receive(&mut rx, &mut out, &self.config.receive_mode()).await?;
        tracing::info!(
            "Captured {} byte(s) into {} ({} dropped)",
            receive_report.bytes_read,
            self.config.output_path(),
            receive_report.bytes_dropped
        );

        drop(out);
        drop(rx);
        drop(tx);

        Ok(BridgeSummary {
            started_at: started_at.to_rfc3339(),
            uart0: self.config.uart0().to_string(),
            uart1: self.config.uart1().to_string(),
            baud,
            input_path: self.config.input_path().to_string(),
            output_path: self.config.output_path().to_string(),
            transmit: transmit_report,
            receive: receive_report,
            elapsed_ms: clock.elapsed().as_millis() as u64,
        })
    }
}
