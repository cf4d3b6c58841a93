//! Line protocol reader
//!
//! Accumulates transport bytes into newline-terminated command lines. The
//! buffer is fixed-size so the reader works without an allocator.
//!
//! ## Overflow policy
//!
//! A line longer than the buffer keeps its first `N` bytes; everything after
//! that up to the terminator is dropped and a warning is logged. A buffer of
//! [`line_capacity`] bytes leaves room for `WRITE:` plus a payload as long as
//! the device, so only payload bytes WRITE would truncate anyway are lost.

use embedded_io::{Read, ReadReady};
use heapless::Vec;

/// Line terminator
pub const TERMINATOR: u8 = b'\n';

/// Room for the command keyword, line ending and stray whitespace
const LINE_OVERHEAD: usize = 64;

/// Line buffer size that fits a full-device WRITE payload
pub const fn line_capacity(device_capacity: u32) -> usize {
    device_capacity as usize + LINE_OVERHEAD
}

/// Result of polling a byte source for a line
#[derive(Debug, PartialEq, Eq)]
pub enum Poll<'a> {
    /// A complete line, surrounding whitespace removed
    Line(&'a [u8]),
    /// No complete line yet; poll again later
    Pending,
    /// The source reached end of stream
    Closed,
}

/// Newline-delimited line assembler with a fixed buffer of `N` bytes
pub struct LineReader<const N: usize> {
    buf: Vec<u8, N>,
    complete: bool,
    overflowed: bool,
}

impl<const N: usize> LineReader<N> {
    /// Create an empty reader
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            complete: false,
            overflowed: false,
        }
    }

    /// Feed one byte; returns true when it completed a line
    ///
    /// The completed line stays available through [`line`](Self::line)
    /// until the next byte is pushed.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.complete {
            self.buf.clear();
            self.complete = false;
            self.overflowed = false;
        }

        if byte == TERMINATOR {
            if self.overflowed {
                log::warn!("command line exceeded {} bytes, excess dropped", N);
            }
            self.complete = true;
            return true;
        }

        if self.buf.push(byte).is_err() {
            self.overflowed = true;
        }
        false
    }

    /// The most recently completed line, trimmed
    pub fn line(&self) -> Option<&[u8]> {
        self.complete.then(|| self.buf.trim_ascii())
    }

    /// Read from `src` until a line completes or no more bytes are ready
    ///
    /// Bytes of an unfinished line stay buffered across calls.
    pub fn poll<R: Read + ReadReady>(&mut self, src: &mut R) -> Result<Poll<'_>, R::Error> {
        loop {
            if !src.read_ready()? {
                return Ok(Poll::Pending);
            }

            let mut byte = [0u8; 1];
            if src.read(&mut byte)? == 0 {
                return Ok(Poll::Closed);
            }

            if self.push(byte[0]) {
                return Ok(Poll::Line(self.buf.trim_ascii()));
            }
        }
    }
}

impl<const N: usize> Default for LineReader<N> {
    fn default() -> Self {
        Self::new()
    }
}
