//! One-shot command execution

use super::spinner;
use framctl_serial::{normalize_command, ClientError, CommandKind, FramClient, Transport};
use std::io::Write;

/// Send each command in turn and print the responses to stdout
pub fn cmd_exec<T: Transport>(
    client: &mut FramClient<T>,
    commands: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    run_commands(client, commands, &mut stdout.lock())
}

/// Send each command in turn, writing the response lines to `out`
///
/// Stops at the first command the controller answers with `ERROR:`.
pub fn run_commands<T: Transport, W: Write>(
    client: &mut FramClient<T>,
    commands: &[String],
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    for input in commands {
        let command = normalize_command(input);
        let kind = CommandKind::of(&command);
        if kind == CommandKind::Empty {
            log::warn!("Skipping empty command");
            continue;
        }

        let pb = match kind {
            CommandKind::Erase => Some(spinner("Erasing...")?),
            CommandKind::Export => Some(spinner("Exporting...")?),
            _ => None,
        };
        let result = client.execute(&command);
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        let response = result?;
        for line in &response.lines {
            writeln!(out, "{}", line)?;
        }
        out.flush()?;

        if let Some(reason) = response.error() {
            return Err(ClientError::Device(reason.to_string()).into());
        }
    }
    Ok(())
}
