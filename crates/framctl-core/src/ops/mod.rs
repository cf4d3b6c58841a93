//! Operation executors
//!
//! Each executor runs one command to completion against the device and
//! writes its responses. Argument problems and verification mismatches are
//! reported to the host and returned as an [`Outcome`]; device and transport
//! faults come back as `Err` and are handled by the controller.

mod erase;
mod export;
mod read;
mod write;

pub use erase::erase;
pub use export::export;
pub use read::read;
pub use write::write;

/// Addresses between erase progress markers
pub const PROGRESS_INTERVAL: u32 = 1024;
/// Pause after each erase progress marker
pub const ERASE_PAUSE_MS: u32 = 1;
/// Bytes per export row
pub const EXPORT_ROW_LEN: u32 = 16;
/// Export rows starting on this boundary are preceded by a blank line
pub const EXPORT_BLOCK_LEN: u32 = 256;
/// Export pauses after rows starting on this boundary
pub const EXPORT_PAUSE_INTERVAL: u32 = 1024;
/// Pause length during export
pub const EXPORT_PAUSE_MS: u32 = 10;
/// Write verifies every byte whose index is a multiple of this
pub const VERIFY_INTERVAL: u32 = 100;

/// How a command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to do (blank line)
    Ignored,
    /// Operation ran to completion
    Completed,
    /// Refused before touching the device
    Rejected,
    /// Stopped part-way through
    Aborted {
        /// Address where the operation stopped
        position: u32,
    },
}
