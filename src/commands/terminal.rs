//! Interactive command prompt

use framctl_serial::{normalize_command, ClientError, FramClient, Transport, HELP};
use std::io::{BufRead, Write};

/// Prompt shown before each command
pub const PROMPT: &str = "FRAM> ";

/// Read commands from `input` until `exit`, `quit` or end of input
pub fn cmd_terminal<T: Transport, R: BufRead, W: Write>(
    client: &mut FramClient<T>,
    input: R,
    mut out: W,
) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(out, "FRAM terminal. Type 'help' for commands, 'exit' to quit.")?;
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;
        let line = line.trim();

        match line.to_ascii_lowercase().as_str() {
            "" => continue,
            "exit" | "quit" => break,
            "help" => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            _ => {}
        }

        let command = normalize_command(line);
        match client.execute(&command) {
            Ok(response) => {
                for l in &response.lines {
                    writeln!(out, "{}", l)?;
                }
            }
            Err(ClientError::Timeout(cmd)) => {
                log::warn!("No complete response to {}", cmd);
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testutil::simulator;
    use std::io::Cursor;
    use std::time::Duration;

    #[test]
    fn test_terminal_session() {
        let (mut client, server) = simulator(1024);
        client.drain(Duration::from_millis(200)).unwrap();

        let input = Cursor::new("help\n\nwrite hi there\nread 10\nbogus\nQUIT\nERASE\n");
        let mut out = Vec::new();
        cmd_terminal(&mut client, input, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains(HELP));
        assert!(out.contains("FRAM> WRITTEN: Data written successfully\n"));
        assert!(out.contains("FRAM> DATA: hi there\nREAD: Completed reading.\n"));
        assert!(out.contains("FRAM> ERROR: Unknown command\n"));
        assert!(out.ends_with(PROMPT));
        assert!(!out.contains("ERASING"));

        drop(client);
        let fram = server.join().unwrap();
        assert_eq!(&fram.data()[..9], b"hi there\0");
    }

    #[test]
    fn test_terminal_ends_at_eof() {
        let (mut client, server) = simulator(256);
        client.drain(Duration::from_millis(200)).unwrap();

        let mut out = Vec::new();
        cmd_terminal(&mut client, Cursor::new("export\n"), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("BEGIN_EXPORT\n0000: "));
        assert!(out.ends_with("END_EXPORT\nFRAM> \n"));

        drop(client);
        server.join().unwrap();
    }
}
