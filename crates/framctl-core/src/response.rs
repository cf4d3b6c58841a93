//! Line protocol writer
//!
//! Every response the controller sends is produced here, so the wire format
//! (status tags, byte renderings, dump rows) lives in one place.

use core::fmt;

use embedded_io::Write;

use crate::error::{Error, Result};

/// Bytes rendered literally by READ and EXPORT
pub fn is_printable(byte: u8) -> bool {
    (32..=126).contains(&byte)
}

/// Formats protocol responses onto an `embedded_io::Write` sink
pub struct ResponseWriter<W> {
    out: W,
}

impl<W: Write> ResponseWriter<W> {
    /// Wrap an output sink
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Access the underlying sink
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Mutably access the underlying sink
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Unwrap the underlying sink
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Emit raw bytes without a line terminator
    pub fn raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.out.write_all(bytes).map_err(transport)
    }

    /// Emit text without a line terminator
    pub fn text(&mut self, text: &str) -> Result<()> {
        self.raw(text.as_bytes())
    }

    /// Terminate the current line
    pub fn end_line(&mut self) -> Result<()> {
        self.raw(b"\n")
    }

    /// Emit a complete line
    pub fn line(&mut self, text: &str) -> Result<()> {
        self.text(text)?;
        self.end_line()
    }

    /// Emit formatted text without a line terminator
    pub fn fmt(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.out.write_fmt(args).map_err(|_| Error::Transport)
    }

    /// Emit `ERROR: <reason>`
    pub fn error(&mut self, reason: &str) -> Result<()> {
        self.text("ERROR: ")?;
        self.line(reason)
    }

    /// Emit `ERROR: <reason> <position>`
    pub fn error_at(&mut self, reason: &str, position: u32) -> Result<()> {
        self.fmt(format_args!("ERROR: {} {}\n", reason, position))
    }

    /// Render one byte the way READ does: printable ASCII verbatim,
    /// everything else as `[XX]`
    pub fn record_byte(&mut self, byte: u8) -> Result<()> {
        if is_printable(byte) {
            self.raw(&[byte])
        } else {
            self.fmt(format_args!("[{:02X}]", byte))
        }
    }

    /// Emit one hex dump row
    ///
    /// `AAAA: XX XX ... XX  ascii`, where each hex field carries a trailing
    /// space and one more space separates the ASCII column.
    pub fn dump_row(&mut self, addr: u32, bytes: &[u8]) -> Result<()> {
        self.fmt(format_args!("{:04X}: ", addr))?;
        for byte in bytes {
            self.fmt(format_args!("{:02X} ", byte))?;
        }
        self.raw(b" ")?;
        for &byte in bytes {
            let shown = if is_printable(byte) { byte } else { b'.' };
            self.raw(&[shown])?;
        }
        self.end_line()
    }

    /// Flush the sink
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().map_err(transport)
    }
}

fn transport<E: embedded_io::Error>(e: E) -> Error {
    log::debug!("transport write failed: {:?}", e.kind());
    Error::Transport
}
