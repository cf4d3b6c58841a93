//! framctl-serial - Host client for FRAM controllers
//!
//! This crate talks the framctl line protocol from the host side: it sends
//! one command per line and gathers the controller's response lines until
//! the status line that ends the command.
//!
//! # Supported Transports
//!
//! - Serial port: `/dev/ttyUSB0`, `/dev/ttyACM0`, `COM1`, etc.
//! - TCP socket: `host:port` (e.g. a `framctl serve --listen` instance)
//!
//! # Example
//!
//! ```no_run
//! use framctl_serial::{FramClient, SerialTransport};
//!
//! let transport = SerialTransport::open("/dev/ttyACM0", Some(115200))?;
//! let mut client = FramClient::new(transport);
//!
//! client.execute("WRITE:Hello World")?.into_result()?;
//! let resp = client.execute("READ:256")?.into_result()?;
//! println!("{}", resp.data().unwrap_or_default());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod error;
pub mod export;
pub mod protocol;
pub mod transport;

// Re-exports
pub use client::{FramClient, Response, DEFAULT_IDLE_TIMEOUT};
pub use error::{ClientError, Result};
pub use export::ExportDump;
pub use protocol::{
    normalize_command, CommandKind, BEGIN_EXPORT, DATA_PREFIX, END_EXPORT, ERROR_PREFIX, HELP,
    READY_PREFIX,
};
pub use transport::serial::{SerialTransport, DEFAULT_BAUD};
pub use transport::tcp::TcpTransport;
pub use transport::Transport;

/// Where the controller lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramConnection {
    /// Serial port connection
    Serial {
        /// Device path (e.g., "/dev/ttyACM0" or "COM3")
        device: String,
        /// Baud rate (None for the firmware default)
        baud: Option<u32>,
    },
    /// TCP socket connection
    Tcp {
        /// Hostname or IP address
        host: String,
        /// Port number
        port: u16,
    },
}

impl FramConnection {
    /// Parse a connection string
    ///
    /// Formats:
    /// - `dev=/dev/ttyACM0` - Serial with default baud
    /// - `dev=/dev/ttyACM0:115200` - Serial with specified baud
    /// - `ip=host:port` - TCP connection
    pub fn parse(s: &str) -> Result<Self> {
        if let Some(dev) = s.strip_prefix("dev=") {
            if dev.is_empty() {
                return Err(ClientError::InvalidParameter(
                    "Missing device path in dev= parameter".into(),
                ));
            }
            match dev.rsplit_once(':') {
                Some((device, baud_str)) if !device.is_empty() => {
                    let baud = baud_str.parse().map_err(|_| {
                        ClientError::InvalidParameter(format!("Invalid baud rate: {}", baud_str))
                    })?;
                    Ok(FramConnection::Serial {
                        device: device.to_string(),
                        baud: Some(baud),
                    })
                }
                _ => Ok(FramConnection::Serial {
                    device: dev.to_string(),
                    baud: None,
                }),
            }
        } else if let Some(ip) = s.strip_prefix("ip=") {
            let (host, port_str) = ip.rsplit_once(':').ok_or_else(|| {
                ClientError::InvalidParameter("Missing port in ip= parameter".into())
            })?;
            let port = port_str
                .parse()
                .map_err(|_| ClientError::InvalidParameter(format!("Invalid port: {}", port_str)))?;
            Ok(FramConnection::Tcp {
                host: host.to_string(),
                port,
            })
        } else {
            Err(ClientError::InvalidParameter(format!(
                "Invalid connection string: {}. Use dev=... or ip=...",
                s
            )))
        }
    }
}

impl core::str::FromStr for FramConnection {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl core::fmt::Display for FramConnection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FramConnection::Serial { device, baud: None } => write!(f, "dev={}", device),
            FramConnection::Serial {
                device,
                baud: Some(baud),
            } => write!(f, "dev={}:{}", device, baud),
            FramConnection::Tcp { host, port } => write!(f, "ip={}:{}", host, port),
        }
    }
}

/// Open a connection and return a client over a type-erased transport
pub fn open_client(conn: &FramConnection) -> Result<FramClient<Box<dyn Transport>>> {
    let transport: Box<dyn Transport> = match conn {
        FramConnection::Serial { device, baud } => {
            Box::new(SerialTransport::open(device, *baud)?)
        }
        FramConnection::Tcp { host, port } => Box::new(TcpTransport::connect(host, *port)?),
    };
    Ok(FramClient::new(transport))
}
