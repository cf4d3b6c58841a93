//! Error types for the simulator

use std::path::PathBuf;

use thiserror::Error;

/// Simulator errors
#[derive(Debug, Error)]
pub enum SimError {
    /// Backing image could not be read or written
    #[error("FRAM image {path}: {source}")]
    Image {
        /// Image file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Capacity outside what the protocol can address
    #[error("Invalid capacity: {0} (must be 1..=65536)")]
    InvalidCapacity(u32),
}
