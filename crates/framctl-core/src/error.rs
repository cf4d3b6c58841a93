//! Error types for framctl-core
//!
//! This module provides a no_std compatible error type. Protocol-level
//! failures (unknown commands, bad arguments, verification mismatches) are
//! not errors here: they are reported to the host as `ERROR:` lines and the
//! session continues. This type covers faults below and above the protocol.

use core::fmt;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Memory device did not respond during initialization
    DeviceNotFound,
    /// Byte-level device access failed
    DeviceIo {
        /// Address being accessed when the fault occurred
        addr: u32,
    },
    /// Address is beyond the device capacity
    AddressOutOfBounds {
        /// Offending address
        addr: u32,
    },
    /// Reading commands from or writing responses to the host failed
    Transport,
}

impl Error {
    /// Address associated with a device fault, if any
    pub fn device_addr(&self) -> Option<u32> {
        match self {
            Self::DeviceIo { addr } | Self::AddressOutOfBounds { addr } => Some(*addr),
            Self::DeviceNotFound | Self::Transport => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceNotFound => write!(f, "FRAM device not found"),
            Self::DeviceIo { addr } => write!(f, "FRAM I/O failure at 0x{:04X}", addr),
            Self::AddressOutOfBounds { addr } => {
                write!(f, "address 0x{:04X} is out of bounds", addr)
            }
            Self::Transport => write!(f, "transport I/O error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
