//! Sentinel-terminated record view
//!
//! The FRAM holds one logical record: the bytes from address 0 up to (not
//! including) the first zero byte. This module layers that view over the raw
//! device so that READ can stop at the sentinel while EXPORT keeps dumping
//! raw bytes.

use crate::device::FramDevice;
use crate::error::Result;

/// Value marking the end of the stored record
pub const SENTINEL: u8 = 0x00;

/// Record view over a FRAM device
pub struct Record<'a, D: FramDevice + ?Sized> {
    dev: &'a mut D,
}

impl<'a, D: FramDevice + ?Sized> Record<'a, D> {
    /// Wrap a device
    pub fn new(dev: &'a mut D) -> Self {
        Self { dev }
    }

    /// Visit record bytes in address order
    ///
    /// Stops at the sentinel or after `limit` bytes, whichever comes first.
    /// `limit` is clamped to the device capacity. Returns the number of
    /// bytes passed to `visit`.
    pub fn scan<F>(&mut self, limit: u32, mut visit: F) -> Result<u32>
    where
        F: FnMut(u8) -> Result<()>,
    {
        let limit = limit.min(self.dev.capacity());
        let mut visited = 0;

        for addr in 0..limit {
            let byte = self.dev.read_byte(addr)?;
            if byte == SENTINEL {
                break;
            }
            visit(byte)?;
            visited += 1;
        }

        Ok(visited)
    }

    /// Close a record of `len` bytes
    ///
    /// Writes the sentinel at `len` and zeroes every address after it, so
    /// no residue of a previous longer record survives.
    pub fn terminate(&mut self, len: u32) -> Result<()> {
        let capacity = self.dev.capacity();
        for addr in len..capacity {
            self.dev.write_byte(addr, SENTINEL)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MemFram;
    use std::vec::Vec;

    #[test]
    fn test_scan_stops_at_sentinel() {
        let mut fram = MemFram::with_data(64, b"abc\0def");
        let mut seen = Vec::new();
        let n = Record::new(&mut fram)
            .scan(64, |b| {
                seen.push(b);
                Ok(())
            })
            .unwrap();
        assert_eq!(n, 3);
        assert_eq!(seen, b"abc");
        assert_eq!(fram.reads(), 4);
    }

    #[test]
    fn test_scan_stops_at_limit() {
        let mut fram = MemFram::with_data(64, b"abcdef");
        let n = Record::new(&mut fram).scan(2, |_| Ok(())).unwrap();
        assert_eq!(n, 2);
        assert_eq!(fram.reads(), 2);
    }

    #[test]
    fn test_scan_without_sentinel_stops_at_capacity() {
        let mut fram = MemFram::with_data(4, b"wxyz");
        assert_eq!(Record::new(&mut fram).scan(100, |_| Ok(())).unwrap(), 4);
        assert_eq!(fram.reads(), 4);
    }

    #[test]
    fn test_terminate_clears_tail() {
        let mut fram = MemFram::with_data(16, b"long old record!");
        Record::new(&mut fram).terminate(3).unwrap();
        assert_eq!(&fram.data()[..3], b"lon");
        assert!(fram.data()[3..].iter().all(|&b| b == 0));
        assert_eq!(Record::new(&mut fram).scan(16, |_| Ok(())).unwrap(), 3);
    }

    #[test]
    fn test_scan_of_blank_device_is_empty() {
        let mut fram = MemFram::new(8);
        assert_eq!(Record::new(&mut fram).scan(8, |_| Ok(())).unwrap(), 0);
        assert_eq!(fram.reads(), 1);
    }
}
