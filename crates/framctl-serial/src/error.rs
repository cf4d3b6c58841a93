//! Error types for client operations

use thiserror::Error;

/// Client-side errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Failed to connect to device
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Device stopped answering before the command finished
    #[error("Timed out waiting for response to {0}")]
    Timeout(String),

    /// Device answered with an `ERROR:` line
    #[error("Device error: {0}")]
    Device(String),

    /// Export transcript could not be decoded
    #[error("Malformed export at line {line}: {reason}")]
    MalformedExport {
        /// 1-based line number within the transcript
        line: usize,
        /// What was wrong
        reason: String,
    },

    /// I/O error during communication
    #[error("I/O error: {0}")]
    IoError(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Serial port error
    #[error("Serial port error: {0}")]
    SerialError(#[from] serialport::Error),
}

/// Result type for client operations
pub type Result<T> = core::result::Result<T, ClientError>;

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::IoError(e.to_string())
    }
}
