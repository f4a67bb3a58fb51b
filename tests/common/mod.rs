#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use uart_bridge::core::{PortOpener, SerialLink};
use uart_bridge::utils::error::{BridgeError, Result};

#[derive(Default)]
pub struct PortState {
    pub writes: Vec<(Instant, Vec<u8>)>,
    pub flushes: usize,
    pub rx: VecDeque<u8>,
    /// Bytes that show up `offset` after the port is opened.
    pub scheduled: Vec<(Duration, Vec<u8>)>,
    pub opened_at: Option<Instant>,
    pub opened_with: Option<(u32, Duration)>,
    pub open_count: usize,
    pub close_count: usize,
    pub availability_checks: usize,
    pub fail_writes: bool,
    pub fail_reads: bool,
}

impl PortState {
    fn promote_arrivals(&mut self) {
        let Some(opened_at) = self.opened_at else {
            return;
        };
        let now = Instant::now();
        let (due, later): (Vec<_>, Vec<_>) = self
            .scheduled
            .drain(..)
            .partition(|(offset, _)| opened_at + *offset <= now);
        self.scheduled = later;
        for (_, bytes) in due {
            self.rx.extend(bytes);
        }
    }
}

/// Test-side handle to inspect what happened on a mock port.
#[derive(Clone, Default)]
pub struct MockPort {
    state: Arc<Mutex<PortState>>,
}

impl MockPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preload(&self, bytes: &[u8]) -> &Self {
        self.state.lock().unwrap().rx.extend(bytes.iter().copied());
        self
    }

    pub fn deliver_after(&self, offset: Duration, bytes: &[u8]) -> &Self {
        self.state
            .lock()
            .unwrap()
            .scheduled
            .push((offset, bytes.to_vec()));
        self
    }

    pub fn fail_writes(&self) -> &Self {
        self.state.lock().unwrap().fail_writes = true;
        self
    }

    pub fn fail_reads(&self) -> &Self {
        self.state.lock().unwrap().fail_reads = true;
        self
    }

    pub fn written(&self) -> Vec<Vec<u8>> {
        let state = self.state.lock().unwrap();
        state.writes.iter().map(|(_, bytes)| bytes.clone()).collect()
    }

    pub fn write_times(&self) -> Vec<Instant> {
        let state = self.state.lock().unwrap();
        state.writes.iter().map(|(at, _)| *at).collect()
    }

    pub fn with_state<T>(&self, f: impl FnOnce(&PortState) -> T) -> T {
        f(&self.state.lock().unwrap())
    }
}

pub struct MockLink {
    name: String,
    state: Arc<Mutex<PortState>>,
}

impl MockLink {
    fn io_error(&self) -> BridgeError {
        BridgeError::PortIoError {
            port: self.name.clone(),
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "device unplugged"),
        }
    }
}

impl SerialLink for MockLink {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_writes {
            return Err(self.io_error());
        }
        state.writes.push((Instant::now(), bytes.to_vec()));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.state.lock().unwrap().flushes += 1;
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<u32> {
        let mut state = self.state.lock().unwrap();
        state.availability_checks += 1;
        state.promote_arrivals();
        Ok(state.rx.len() as u32)
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(self.io_error());
        }
        state.promote_arrivals();
        Ok(state.rx.pop_front())
    }
}

impl Drop for MockLink {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.close_count += 1;
        }
    }
}

#[derive(Default)]
pub struct MockOpener {
    ports: HashMap<String, MockPort>,
    missing: HashSet<String>,
}

impl MockOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_port(mut self, name: &str, port: &MockPort) -> Self {
        self.ports.insert(name.to_string(), port.clone());
        self
    }

    pub fn with_missing(mut self, name: &str) -> Self {
        self.missing.insert(name.to_string());
        self
    }
}

impl PortOpener for MockOpener {
    type Link = MockLink;

    fn open(&self, name: &str, baud: u32, read_timeout: Duration) -> Result<MockLink> {
        let port = match self.ports.get(name) {
            Some(port) if !self.missing.contains(name) => port,
            _ => {
                return Err(BridgeError::PortOpenError {
                    port: name.to_string(),
                    source: serialport::Error::new(
                        serialport::ErrorKind::NoDevice,
                        "no such device",
                    ),
                })
            }
        };

        {
            let mut state = port.state.lock().unwrap();
            state.open_count += 1;
            state.opened_at = Some(Instant::now());
            state.opened_with = Some((baud, read_timeout));
        }

        Ok(MockLink {
            name: name.to_string(),
            state: Arc::clone(&port.state),
        })
    }
}
