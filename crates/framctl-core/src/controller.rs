//! Command dispatcher and control loop
//!
//! The [`Controller`] owns the device, the response writer and the
//! initialization flag. It handles one line at a time and runs the matching
//! operation to completion before looking at further input.

use embedded_io::{Read, ReadReady, Write};

use crate::command::Command;
use crate::device::FramDevice;
use crate::error::{Error, Result};
use crate::line::{LineReader, Poll};
use crate::ops::{self, Outcome};
use crate::response::ResponseWriter;

/// Result of one control loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No complete line was available
    Idle,
    /// A line was handled
    Handled(Outcome),
    /// The input stream ended
    Closed,
}

/// Line protocol controller for one FRAM device
pub struct Controller<D, W> {
    device: D,
    out: ResponseWriter<W>,
    initialized: bool,
}

impl<D: FramDevice, W: Write> Controller<D, W> {
    /// Initialize the device and announce readiness
    ///
    /// A failed `init` is not an error here: the controller still starts,
    /// prints `ERROR: FRAM not found` and rejects every command afterwards.
    pub fn start(mut device: D, out: W) -> Result<Self> {
        let initialized = match device.init() {
            Ok(()) => {
                log::info!("FRAM initialized ({} bytes)", device.capacity());
                true
            }
            Err(e) => {
                log::error!("FRAM init failed: {}", e);
                false
            }
        };

        let mut controller = Self::with_state(device, out, initialized);
        controller.banner()?;
        Ok(controller)
    }

    /// Build a controller with a known initialization state, skipping
    /// `init` and the banner
    pub fn with_state(device: D, out: W, initialized: bool) -> Self {
        Self {
            device,
            out: ResponseWriter::new(out),
            initialized,
        }
    }

    fn banner(&mut self) -> Result<()> {
        if self.initialized {
            self.out.line("READY: FRAM initialized")?;
            self.out
                .line("READY: Commands: ERASE, WRITE:data, READ:bytes, EXPORT")?;
        } else {
            self.out.error("FRAM not found")?;
        }
        self.out.flush()
    }

    /// Whether the device initialized successfully
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Access the device
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Access the output sink
    pub fn output(&self) -> &W {
        self.out.get_ref()
    }

    /// Mutably access the output sink
    pub fn output_mut(&mut self) -> &mut W {
        self.out.get_mut()
    }

    /// Split into device and output sink
    pub fn into_parts(self) -> (D, W) {
        (self.device, self.out.into_inner())
    }

    /// Handle one command line
    ///
    /// Device faults are reported to the host as
    /// `ERROR: FRAM I/O failure at position <addr>` and end the command;
    /// only transport errors are returned.
    pub fn handle_line(&mut self, line: &[u8]) -> Result<Outcome> {
        let outcome = match self.dispatch(line) {
            Ok(outcome) => outcome,
            Err(e) => match e.device_addr() {
                Some(addr) => {
                    log::error!("{}", e);
                    self.out.error_at("FRAM I/O failure at position", addr)?;
                    Outcome::Aborted { position: addr }
                }
                None => return Err(e),
            },
        };
        self.out.flush()?;
        Ok(outcome)
    }

    fn dispatch(&mut self, line: &[u8]) -> Result<Outcome> {
        if !self.initialized {
            self.out.error("FRAM not initialized")?;
            return Ok(Outcome::Rejected);
        }

        let command = Command::parse(line);
        if command != Command::Empty {
            log::debug!("command: {}", command.name());
        }

        let dev = &mut self.device;
        let out = &mut self.out;
        match command {
            Command::Erase => ops::erase(dev, out),
            Command::Write(data) => ops::write(dev, out, data),
            Command::Read(count) => ops::read(dev, out, count),
            Command::Export => ops::export(dev, out),
            Command::Unknown => {
                out.error("Unknown command")?;
                Ok(Outcome::Rejected)
            }
            Command::Empty => Ok(Outcome::Ignored),
        }
    }

    /// Run one control loop iteration
    ///
    /// Reads from `src` until a line is complete, then handles it. Returns
    /// [`Step::Idle`] when `src` has no more bytes ready.
    pub fn poll<R, const N: usize>(
        &mut self,
        reader: &mut LineReader<N>,
        src: &mut R,
    ) -> Result<Step>
    where
        R: Read + ReadReady,
    {
        let polled = reader.poll(src).map_err(|e| {
            log::debug!("transport read failed: {:?}", embedded_io::Error::kind(&e));
            Error::Transport
        })?;

        match polled {
            Poll::Line(line) => self.handle_line(line).map(Step::Handled),
            Poll::Pending => Ok(Step::Idle),
            Poll::Closed => Ok(Step::Closed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MemFram, Script, Transcript};

    fn controller(fram: MemFram) -> Controller<MemFram, Transcript> {
        Controller::start(fram, Transcript::default()).unwrap()
    }

    /// Feed lines and return everything printed after the banner
    fn session(c: &mut Controller<MemFram, Transcript>, lines: &[&str]) -> std::string::String {
        c.output_mut().0.clear();
        for line in lines {
            c.handle_line(line.as_bytes()).unwrap();
        }
        c.output().text().into()
    }

    #[test]
    fn test_banner() {
        let c = controller(MemFram::new(64));
        assert!(c.is_initialized());
        assert_eq!(
            c.output().lines(),
            [
                "READY: FRAM initialized",
                "READY: Commands: ERASE, WRITE:data, READ:bytes, EXPORT"
            ]
        );
    }

    #[test]
    fn test_uninitialized_rejects_everything() {
        let mut c = controller(MemFram::absent(64));
        assert!(!c.is_initialized());
        assert_eq!(c.output().text(), "ERROR: FRAM not found\n");

        let out = session(&mut c, &["ERASE", "", "READ:5", "bogus"]);
        assert_eq!(out, "ERROR: FRAM not initialized\n".repeat(4));
        assert_eq!(c.device().writes(), 0);
        assert_eq!(c.device().reads(), 0);
    }

    #[test]
    fn test_empty_line_is_silent() {
        let mut c = controller(MemFram::new(64));
        assert_eq!(session(&mut c, &["", "   "]), "");
        assert_eq!(c.handle_line(b"").unwrap(), Outcome::Ignored);
    }

    #[test]
    fn test_unknown_command() {
        let mut c = controller(MemFram::new(64));
        assert_eq!(session(&mut c, &["FORMAT"]), "ERROR: Unknown command\n");
    }

    #[test]
    fn test_reference_scenario() {
        let mut c = controller(MemFram::new(32768));
        let out = session(&mut c, &["WRITE:hello", "READ:20", "ERASE", "READ:20"]);
        let dots = ".".repeat(3 + 32);
        let expected = [
            "WRITTEN: Data written successfully".into(),
            "DATA: hello".into(),
            "READ: Completed reading.".into(),
            std::format!("ERASING{}DONE", dots),
            "ERASED: Full FRAM erased successfully".into(),
            "DATA: ".into(),
            "READ: Memory is empty.".into(),
        ];
        let got: std::vec::Vec<std::string::String> = out.lines().map(Into::into).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_shorter_write_clears_longer_record() {
        let mut c = controller(MemFram::new(256));
        let out = session(&mut c, &["WRITE:a much longer record", "WRITE:short", "READ:256"]);
        assert!(out.contains("DATA: short\n"));
    }

    #[test]
    fn test_write_read_roundtrip_with_binary_bytes() {
        let mut c = controller(MemFram::new(128));
        c.handle_line(b"WRITE:a\x01b\xFFc").unwrap();
        let out = session(&mut c, &["READ:128"]);
        assert_eq!(out, "DATA: a[01]b[FF]c\nREAD: Completed reading.\n");
        assert_eq!(c.device().data()[6], 0);
    }

    #[test]
    fn test_device_fault_reported_and_session_continues() {
        let mut fram = MemFram::with_data(64, b"abc");
        fram.break_at(1);
        let mut c = controller(fram);
        let out = session(&mut c, &["READ:10", "FOO"]);
        assert_eq!(
            out,
            "DATA: a\nERROR: FRAM I/O failure at position 1\nERROR: Unknown command\n"
        );
    }

    #[test]
    fn test_poll_reads_one_line_per_step() {
        let mut c = controller(MemFram::new(64));
        c.output_mut().0.clear();
        let mut reader: LineReader<128> = LineReader::new();
        let mut src = Script {
            data: b"WRITE:xy\nREAD:2\n",
            closes: true,
        };

        assert_eq!(
            c.poll(&mut reader, &mut src).unwrap(),
            Step::Handled(Outcome::Completed)
        );
        assert_eq!(
            c.output().lines(),
            ["WRITTEN: Data written successfully"]
        );
        assert_eq!(
            c.poll(&mut reader, &mut src).unwrap(),
            Step::Handled(Outcome::Completed)
        );
        assert_eq!(c.poll(&mut reader, &mut src).unwrap(), Step::Closed);
    }
}
