//! Test doubles shared by the unit tests

use crate::device::FramDevice;
use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::vec;
use std::vec::Vec;

/// Vec-backed FRAM with access counters and stuck addresses
pub struct MemFram {
    data: Vec<u8>,
    reads: usize,
    writes: usize,
    present: bool,
    stuck: BTreeSet<u32>,
    broken: BTreeSet<u32>,
}

impl MemFram {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            reads: 0,
            writes: 0,
            present: true,
            stuck: BTreeSet::new(),
            broken: BTreeSet::new(),
        }
    }

    pub fn with_data(capacity: usize, initial: &[u8]) -> Self {
        let mut fram = Self::new(capacity);
        fram.data[..initial.len()].copy_from_slice(initial);
        fram
    }

    pub fn absent(capacity: usize) -> Self {
        let mut fram = Self::new(capacity);
        fram.present = false;
        fram
    }

    /// Writes to `addr` are silently dropped
    pub fn stick(&mut self, addr: u32) {
        self.stuck.insert(addr);
    }

    /// Any access to `addr` fails
    pub fn break_at(&mut self, addr: u32) {
        self.broken.insert(addr);
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    fn check(&self, addr: u32) -> Result<usize> {
        if self.broken.contains(&addr) {
            return Err(Error::DeviceIo { addr });
        }
        if addr as usize >= self.data.len() {
            return Err(Error::AddressOutOfBounds { addr });
        }
        Ok(addr as usize)
    }
}

impl FramDevice for MemFram {
    fn capacity(&self) -> u32 {
        self.data.len() as u32
    }

    fn init(&mut self) -> Result<()> {
        if self.present {
            Ok(())
        } else {
            Err(Error::DeviceNotFound)
        }
    }

    fn read_byte(&mut self, addr: u32) -> Result<u8> {
        let idx = self.check(addr)?;
        self.reads += 1;
        Ok(self.data[idx])
    }

    fn write_byte(&mut self, addr: u32, value: u8) -> Result<()> {
        let idx = self.check(addr)?;
        self.writes += 1;
        if !self.stuck.contains(&addr) {
            self.data[idx] = value;
        }
        Ok(())
    }
}

/// Output sink collecting everything the controller emits
#[derive(Default)]
pub struct Transcript(pub Vec<u8>);

impl Transcript {
    pub fn text(&self) -> &str {
        core::str::from_utf8(&self.0).unwrap()
    }

    pub fn lines(&self) -> Vec<&str> {
        self.text().lines().collect()
    }
}

impl embedded_io::ErrorType for Transcript {
    type Error = core::convert::Infallible;
}

impl embedded_io::Write for Transcript {
    fn write(&mut self, buf: &[u8]) -> core::result::Result<usize, Self::Error> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }
}

/// Byte source that is ready while it has data, then either idles or
/// reports end of stream
pub struct Script<'a> {
    pub data: &'a [u8],
    pub closes: bool,
}

impl embedded_io::ErrorType for Script<'_> {
    type Error = core::convert::Infallible;
}

impl embedded_io::Read for Script<'_> {
    fn read(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error> {
        let n = buf.len().min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

impl embedded_io::ReadReady for Script<'_> {
    fn read_ready(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(!self.data.is_empty() || self.closes)
    }
}
