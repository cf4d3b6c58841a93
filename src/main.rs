//! framctl - FRAM record controller and host client
//!
//! The controller keeps a single zero-terminated record in a small FRAM and
//! answers a newline-delimited text protocol (`ERASE`, `WRITE:`, `READ:`,
//! `EXPORT`).
//!
//! # Architecture
//!
//! - **framctl-core** - the `no_std` controller: line reader, command
//!   dispatch and the four operations, generic over a `FramDevice`
//! - **framctl-sim** - a simulated FRAM, so the controller can run on the
//!   host (`framctl serve`)
//! - **framctl-serial** - the host-side client used by `exec`, `terminal`
//!   and `export` over a serial port or TCP

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    match cli.command {
        Commands::Serve {
            capacity,
            image,
            listen,
            absent,
            realtime,
        } => commands::serve::cmd_serve(&commands::serve::ServeOptions {
            capacity,
            image,
            listen,
            absent,
            realtime,
        }),
        Commands::Exec {
            conn,
            commands: list,
        } => {
            let mut client = commands::connect(&conn)?;
            commands::exec::cmd_exec(&mut client, &list)
        }
        Commands::Terminal { conn } => {
            let mut client = commands::connect(&conn)?;
            let stdin = std::io::stdin();
            commands::terminal::cmd_terminal(&mut client, stdin.lock(), std::io::stdout())
        }
        Commands::Export {
            conn,
            output,
            binary,
        } => {
            let mut client = commands::connect(&conn)?;
            commands::export::cmd_export(&mut client, &output, binary)
        }
    }
}
