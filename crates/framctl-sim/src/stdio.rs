//! std stream adapters for the `embedded-io` traits
//!
//! The controller is written against `embedded-io` so it can run on a
//! microcontroller UART. Output goes through `embedded-io-adapters`'
//! [`FromStd`]; input additionally needs `ReadReady`, which a blocking std
//! reader can always claim.

use std::io;

use embedded_io_adapters::std::FromStd;

/// Writer adapter
pub type StdWriter<W> = FromStd<W>;

/// Blocking reader adapter
///
/// Always reports ready; a read blocks until data arrives and returns 0
/// only at end of stream.
pub struct StdReader<R> {
    inner: FromStd<R>,
}

impl<R: io::Read> StdReader<R> {
    /// Wrap a std reader
    pub fn new(inner: R) -> Self {
        Self {
            inner: FromStd::new(inner),
        }
    }

    /// Unwrap the std reader
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }
}

impl<R> embedded_io::ErrorType for StdReader<R> {
    type Error = io::Error;
}

impl<R: io::Read> embedded_io::Read for StdReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        loop {
            match self.inner.read(buf) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => return other,
            }
        }
    }
}

impl<R: io::Read> embedded_io::ReadReady for StdReader<R> {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }
}
