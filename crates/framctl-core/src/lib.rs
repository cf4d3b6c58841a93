//! framctl-core - Line protocol core for serial-driven FRAM controllers
//!
//! This crate implements the text command protocol spoken by a FRAM
//! controller: a host sends newline-terminated commands, the controller
//! performs byte-level reads/writes against the memory device and answers
//! with status-prefixed lines. It is `no_std` so the same code runs on a
//! microcontroller and inside the host-side simulator.
//!
//! # Features
//!
//! - `std` - Implement `std::error::Error` for the core error type
//!
//! # Example
//!
//! ```ignore
//! use framctl_core::{Controller, LineReader};
//!
//! let mut controller = Controller::start(fram, serial_tx)?;
//! let mut reader: LineReader<1024> = LineReader::new();
//! loop {
//!     controller.poll(&mut reader, &mut serial_rx)?;
//! }
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod command;
pub mod controller;
pub mod device;
pub mod error;
pub mod line;
pub mod ops;
pub mod record;
pub mod response;

#[cfg(test)]
pub(crate) mod testutil;

pub use command::Command;
pub use controller::{Controller, Step};
pub use device::{FramDevice, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use line::{line_capacity, LineReader, Poll};
pub use ops::Outcome;
pub use record::Record;
pub use response::ResponseWriter;
