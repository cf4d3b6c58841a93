//! Controller on a simulated FRAM
//!
//! Runs the same control loop a microcontroller would, with the UART
//! replaced by stdio or a TCP connection.

use framctl_core::{line_capacity, Controller, LineReader, Outcome, Step};
use framctl_sim::{SimConfig, SimFram, StdReader, StdWriter};
use std::io::{self, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;

/// Line buffer large enough for a full-device WRITE on the largest simulator
const SERVE_LINE_CAPACITY: usize = line_capacity(SimConfig::MAX_CAPACITY);

/// Options for `framctl serve`
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub capacity: u32,
    pub image: Option<PathBuf>,
    pub listen: Option<String>,
    pub absent: bool,
    pub realtime: bool,
}

/// Run the simulated controller until stdin closes, or forever when listening
pub fn cmd_serve(opts: &ServeOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config = SimConfig {
        capacity: opts.capacity,
        present: !opts.absent,
        realtime: opts.realtime,
    };
    config.validate()?;

    let mut fram = match &opts.image {
        Some(path) => SimFram::open_image(config, path)?,
        None => SimFram::new(config),
    };

    match &opts.listen {
        Some(addr) => {
            let listener = TcpListener::bind(addr)?;
            log::info!("Listening on {}", listener.local_addr()?);
            serve_incoming(&mut fram, listener.incoming());
            Ok(())
        }
        None => {
            let stdin = std::io::stdin();
            run_session(&mut fram, stdin.lock(), std::io::stdout().lock())
        }
    }
}

/// Serve accepted connections one after another
///
/// A failed accept or a broken connection is logged and skipped.
pub fn serve_incoming<I>(fram: &mut SimFram, incoming: I)
where
    I: IntoIterator<Item = io::Result<TcpStream>>,
{
    for stream in incoming {
        match stream {
            Ok(stream) => serve_connection(fram, stream),
            Err(e) => log::warn!("Accept failed: {}", e),
        }
    }
}

/// Serve one TCP client
///
/// Each connection starts a fresh session with its own READY banner, as a
/// board does when the serial port is reopened. Memory persists across
/// sessions. A client vanishing mid-response only ends its session.
pub fn serve_connection(fram: &mut SimFram, stream: TcpStream) {
    let peer = match stream.peer_addr() {
        Ok(peer) => peer.to_string(),
        Err(e) => {
            log::warn!("Dropping connection without peer address: {}", e);
            return;
        }
    };
    log::info!("Connection from {}", peer);

    let writer = match stream.set_nodelay(true).and_then(|()| stream.try_clone()) {
        Ok(writer) => writer,
        Err(e) => {
            log::warn!("Could not set up connection from {}: {}", peer, e);
            return;
        }
    };

    match run_session(fram, BufReader::new(stream), writer) {
        Ok(()) => log::info!("{} disconnected", peer),
        Err(e) => log::warn!("Session with {} ended: {}", peer, e),
    }
}

/// Run the control loop over a pair of std streams until input ends
///
/// The backing image, if any, is saved after every command that wrote to
/// the device.
pub fn run_session<R: Read, W: Write>(
    fram: &mut SimFram,
    input: R,
    output: W,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = Box::new(LineReader::<SERVE_LINE_CAPACITY>::new());
    let mut src = StdReader::new(input);
    let mut controller = Controller::start(&mut *fram, StdWriter::new(output))?;

    loop {
        let writes = controller.device().writes();
        match controller.poll(&mut *reader, &mut src)? {
            Step::Handled(Outcome::Ignored) | Step::Idle => {}
            Step::Handled(outcome) => {
                log::debug!("{:?}", outcome);
                if controller.device().writes() != writes {
                    controller.device().save()?;
                }
            }
            Step::Closed => return Ok(()),
        }
    }
}
