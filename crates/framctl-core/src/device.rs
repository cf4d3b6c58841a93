//! Memory device adapter trait
//!
//! The controller only ever touches the FRAM through this trait: a fixed
//! capacity, a one-shot `init`, and single-byte reads and writes. Drivers for
//! real parts (I2C/SPI FRAM breakouts) and the host-side simulator implement
//! it.

use crate::error::Result;

/// Capacity of the reference part (32 KiB, e.g. MB85RC256V)
pub const DEFAULT_CAPACITY: u32 = 32 * 1024;

/// Byte-addressable FRAM device
///
/// Addresses are in `0..capacity()`. Implementations should return
/// `Error::AddressOutOfBounds` for anything past the end rather than
/// wrapping, and `Error::DeviceIo` when the bus transaction fails.
///
/// # Example
///
/// ```ignore
/// use framctl_core::FramDevice;
///
/// fn first_byte<D: FramDevice>(dev: &mut D) -> framctl_core::Result<u8> {
///     dev.read_byte(0)
/// }
/// ```
pub trait FramDevice {
    /// Total number of addressable bytes
    fn capacity(&self) -> u32;

    /// Probe and initialize the device
    ///
    /// Called once at startup. An error here leaves the controller in the
    /// "not initialized" state for the rest of the session.
    fn init(&mut self) -> Result<()>;

    /// Read a single byte
    fn read_byte(&mut self, addr: u32) -> Result<u8>;

    /// Write a single byte
    fn write_byte(&mut self, addr: u32, value: u8) -> Result<()>;

    /// Pause for the given number of milliseconds
    ///
    /// Long scans call this at coarse intervals so the outbound transport
    /// buffer can drain. The default does nothing.
    fn delay_ms(&mut self, _ms: u32) {}
}

impl<D: FramDevice + ?Sized> FramDevice for &mut D {
    fn capacity(&self) -> u32 {
        (**self).capacity()
    }

    fn init(&mut self) -> Result<()> {
        (**self).init()
    }

    fn read_byte(&mut self, addr: u32) -> Result<u8> {
        (**self).read_byte(addr)
    }

    fn write_byte(&mut self, addr: u32, value: u8) -> Result<()> {
        (**self).write_byte(addr, value)
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}
