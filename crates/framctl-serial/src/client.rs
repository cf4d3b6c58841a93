//! Command/response client
//!
//! Sends one wire command at a time and collects the controller's response
//! lines until the line that ends that command.

use std::time::{Duration, Instant};

use crate::error::{ClientError, Result};
use crate::protocol::{CommandKind, DATA_PREFIX, ERROR_PREFIX};
use crate::transport::Transport;

/// Poll slice for a single transport read
const POLL_MS: u32 = 50;

/// Default silence after which a command is considered dead
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Lines the controller sent for one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// Response lines without terminators
    pub lines: Vec<String>,
}

impl Response {
    /// The `ERROR:` reason, if the command failed
    pub fn error(&self) -> Option<&str> {
        self.lines
            .last()
            .and_then(|l| l.strip_prefix(ERROR_PREFIX))
            .map(str::trim)
    }

    /// Whether the command failed
    pub fn is_error(&self) -> bool {
        self.error().is_some()
    }

    /// Rendered READ data (without the `DATA: ` prefix)
    pub fn data(&self) -> Option<&str> {
        self.lines.iter().find_map(|l| l.strip_prefix(DATA_PREFIX))
    }

    /// Turn an `ERROR:` response into `ClientError::Device`
    pub fn into_result(self) -> Result<Self> {
        match self.error() {
            Some(reason) => Err(ClientError::Device(reason.to_string())),
            None => Ok(self),
        }
    }
}

/// Client for a FRAM controller
pub struct FramClient<T: Transport> {
    transport: T,
    pending: Vec<u8>,
    idle_timeout: Duration,
}

impl<T: Transport> FramClient<T> {
    /// Create a client on an open transport
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            pending: Vec::new(),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    /// Set how long the device may stay silent mid-response
    pub fn set_idle_timeout(&mut self, timeout: Duration) {
        self.idle_timeout = timeout;
    }

    /// Collect whatever the device sends within `window`
    ///
    /// Used after connecting to pick up the `READY:` banner, if the board
    /// printed one.
    pub fn drain(&mut self, window: Duration) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        while let Some(line) = self.read_line(window)? {
            log::debug!("<< {}", line);
            lines.push(line);
        }
        Ok(lines)
    }

    /// Send a command and wait for its complete response
    pub fn execute(&mut self, command: &str) -> Result<Response> {
        self.execute_with(command, |_| {})
    }

    /// Like [`execute`](Self::execute), calling `on_line` for each line as
    /// it arrives
    ///
    /// A blank command is not sent. An uninitialized controller answers
    /// even blank lines, so sending one would leave a reply nobody reads.
    pub fn execute_with<F>(&mut self, command: &str, mut on_line: F) -> Result<Response>
    where
        F: FnMut(&str),
    {
        let kind = CommandKind::of(command);
        let mut response = Response::default();
        if kind == CommandKind::Empty {
            return Ok(response);
        }
        log::debug!(">> {}", command);

        self.transport.write(command.as_bytes())?;
        self.transport.write(b"\n")?;
        self.transport.flush()?;

        loop {
            let line = self
                .read_line(self.idle_timeout)?
                .ok_or_else(|| ClientError::Timeout(command.to_string()))?;
            log::trace!("<< {}", line);
            on_line(&line);

            let done = kind.is_final(&line);
            response.lines.push(line);
            if done {
                return Ok(response);
            }
        }
    }

    /// Read one line, or None after `idle` without new bytes
    fn read_line(&mut self, idle: Duration) -> Result<Option<String>> {
        let mut last_activity = Instant::now();
        let mut chunk = [0u8; 512];

        loop {
            if let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
                let raw: Vec<u8> = self.pending.drain(..=pos).collect();
                let text = String::from_utf8_lossy(&raw[..pos]);
                return Ok(Some(text.trim_end_matches('\r').to_string()));
            }

            if last_activity.elapsed() >= idle {
                return Ok(None);
            }

            let n = self.transport.read_nonblock(&mut chunk, POLL_MS)?;
            if n > 0 {
                self.pending.extend_from_slice(&chunk[..n]);
                last_activity = Instant::now();
            }
        }
    }

    /// Give back the transport
    pub fn into_inner(self) -> T {
        self.transport
    }
}
