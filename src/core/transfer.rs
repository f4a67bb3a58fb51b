use crate::core::decoder::LossyDecoder;
use crate::domain::model::{Payload, ReceiveMode, ReceiveReport, TransmitReport};
use crate::domain::ports::SerialLink;
use crate::utils::error::Result;
use std::io::Write;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Sleep between availability checks while waiting for a quiet window.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Writes the payload one character per write, flushing and pausing after each.
pub async fn transmit<L: SerialLink + ?Sized>(
    link: &mut L,
    payload: &Payload,
    char_delay: Duration,
) -> Result<TransmitReport> {
    let mut report = TransmitReport::default();
    let mut buf = [0u8; 4];

    for ch in payload.text.chars() {
        let bytes = ch.encode_utf8(&mut buf).as_bytes();
        link.write_all(bytes)?;
        link.flush()?;
        tracing::trace!("{} <- {:?}", link.name(), ch);

        report.chars_sent += 1;
        report.bytes_written += bytes.len();
        sleep(char_delay).await;
    }

    Ok(report)
}

/// Moves received bytes into `out` according to `mode`.
pub async fn receive<L, W>(link: &mut L, out: &mut W, mode: &ReceiveMode) -> Result<ReceiveReport>
where
    L: SerialLink + ?Sized,
    W: Write + ?Sized,
{
    let mut sink = DecodingSink::new(out);

    match *mode {
        ReceiveMode::Snapshot => {
            while link.bytes_available()? > 0 {
                match link.read_byte()? {
                    Some(byte) => sink.push(byte)?,
                    None => break,
                }
            }
        }
        ReceiveMode::Quiet { quiet, max } => {
            let started = Instant::now();
            let mut last_activity = started;

            while started.elapsed() < max {
                if link.bytes_available()? > 0 {
                    if let Some(byte) = link.read_byte()? {
                        sink.push(byte)?;
                        last_activity = Instant::now();
                        continue;
                    }
                }
                if last_activity.elapsed() >= quiet {
                    break;
                }
                sleep(POLL_INTERVAL).await;
            }
        }
    }

    sink.finish()
}

struct DecodingSink<'a, W: Write + ?Sized> {
    out: &'a mut W,
    decoder: LossyDecoder,
    report: ReceiveReport,
}

impl<'a, W: Write + ?Sized> DecodingSink<'a, W> {
    fn new(out: &'a mut W) -> Self {
        Self {
            out,
            decoder: LossyDecoder::new(),
            report: ReceiveReport::default(),
        }
    }

    fn push(&mut self, byte: u8) -> Result<()> {
        self.report.bytes_read += 1;
        match self.decoder.push(byte) {
            Some(ch) => {
                let mut buf = [0u8; 4];
                let encoded = ch.encode_utf8(&mut buf);
                self.out.write_all(encoded.as_bytes())?;
                self.report.text_bytes_written += encoded.len();
            }
            None => tracing::trace!("byte {:#04x} held or dropped by decoder", byte),
        }
        Ok(())
    }

    fn finish(mut self) -> Result<ReceiveReport> {
        self.out.flush()?;
        self.report.bytes_dropped = self.decoder.finish();
        if self.report.bytes_dropped > 0 {
            tracing::debug!(
                "Dropped {} undecodable byte(s) from the capture",
                self.report.bytes_dropped
            );
        }
        Ok(self.report)
    }
}
