//! CLI argument parsing

use clap::{Parser, Subcommand};
use framctl_serial::FramConnection;
use std::path::PathBuf;

/// Parse a string as a hex or decimal u32
fn parse_hex_u32(s: &str) -> Result<u32, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else {
        s.parse::<u32>().map_err(|e| format!("Invalid number: {}", e))
    }
}

/// Parse a `dev=...` / `ip=...` connection string
fn parse_connection(s: &str) -> Result<FramConnection, String> {
    FramConnection::parse(s).map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(name = "framctl")]
#[command(author, version, about = "FRAM record controller and host client", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection options shared by the client commands
#[derive(clap::Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Controller to talk to (dev=<port>[:baud] or ip=<host>:<port>)
    #[arg(short, long, value_parser = parse_connection)]
    pub connection: FramConnection,

    /// Seconds the controller may stay silent before a command times out
    #[arg(long, default_value = "5")]
    pub timeout: u64,

    /// Milliseconds to wait for the READY banner after connecting
    #[arg(long, default_value = "2000")]
    pub settle: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the controller against a simulated FRAM
    Serve {
        /// Device size in bytes (hex or decimal, at most 0x10000)
        #[arg(long, default_value = "32768", value_parser = parse_hex_u32)]
        capacity: u32,

        /// Image file backing the simulated FRAM
        #[arg(long)]
        image: Option<PathBuf>,

        /// Accept TCP connections on HOST:PORT instead of using stdio
        #[arg(long)]
        listen: Option<String>,

        /// Simulate a missing FRAM chip
        #[arg(long)]
        absent: bool,

        /// Honour the progress pauses with real sleeps
        #[arg(long)]
        realtime: bool,
    },

    /// Send commands and print the responses
    Exec {
        #[command(flatten)]
        conn: ConnectionArgs,

        /// Commands such as "READ:256", "read 256" or "write hello"
        #[arg(required = true)]
        commands: Vec<String>,
    },

    /// Interactive command prompt
    Terminal {
        #[command(flatten)]
        conn: ConnectionArgs,
    },

    /// Capture a full memory export to a file
    Export {
        #[command(flatten)]
        conn: ConnectionArgs,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Write raw bytes instead of the hex listing
        #[arg(long)]
        binary: bool,
    },
}
