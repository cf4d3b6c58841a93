//! CLI command implementations
//!
//! `serve` runs the controller itself; the other commands are clients that
//! talk to a controller through [`framctl_serial`].

pub mod exec;
pub mod export;
pub mod serve;
pub mod terminal;

use crate::cli::ConnectionArgs;
use framctl_serial::{open_client, FramClient, Transport, READY_PREFIX};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Client over whichever transport the connection string selected
pub type Client = FramClient<Box<dyn Transport>>;

/// Open the connection and consume the controller's startup banner
pub fn connect(args: &ConnectionArgs) -> Result<Client, Box<dyn std::error::Error>> {
    let mut client = open_client(&args.connection)?;
    client.set_idle_timeout(Duration::from_secs(args.timeout));
    settle(&mut client, Duration::from_millis(args.settle))?;
    Ok(client)
}

/// Wait out a board reset and log whatever banner it printed
pub fn settle<T: Transport>(
    client: &mut FramClient<T>,
    window: Duration,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let banner = client.drain(window)?;
    for line in &banner {
        if line.starts_with(READY_PREFIX) {
            log::info!("{}", line);
        } else {
            log::warn!("{}", line);
        }
    }
    if banner.is_empty() {
        log::debug!("No banner within {:?}", window);
    }
    Ok(banner)
}

/// Create a standard spinner style
fn create_spinner_style() -> Result<ProgressStyle, Box<dyn std::error::Error>> {
    Ok(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?)
}

/// Spinner shown while waiting on a long-running device command
fn spinner(message: &str) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(create_spinner_style()?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}
