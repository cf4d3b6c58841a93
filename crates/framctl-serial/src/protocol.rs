//! Host-side view of the line protocol
//!
//! Knows which response line ends each command and how to turn the
//! friendlier `read 256` / `write hello` spellings into wire commands.

use framctl_core::Command;

/// Prefix of every error response
pub const ERROR_PREFIX: &str = "ERROR:";
/// Status prefix announcing a ready controller
pub const READY_PREFIX: &str = "READY:";
/// Prefix of the READ data line
pub const DATA_PREFIX: &str = "DATA: ";
/// First line of an export
pub const BEGIN_EXPORT: &str = "BEGIN_EXPORT";
/// Last line of an export
pub const END_EXPORT: &str = "END_EXPORT";

/// Command summary shown by the interactive terminal
pub const HELP: &str = "\
Commands:
  ERASE           Erase entire FRAM memory
  WRITE:data      Write text data (e.g. WRITE:Hello World)
  READ:bytes      Read up to the given number of bytes (e.g. READ:256)
  EXPORT          Dump FRAM contents as hex

Shorthands: 'read 256', 'write hello', 'erase', 'export'
  help            Show this message
  exit, quit      Leave the terminal";

/// Kind of command, as far as the response framing is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// `ERASE`
    Erase,
    /// `WRITE:`
    Write,
    /// `READ:`
    Read,
    /// `EXPORT`
    Export,
    /// Anything the controller will call unknown
    Unknown,
    /// Blank line, not sent by the client
    Empty,
}

impl CommandKind {
    /// Classify a wire command the same way the controller does
    pub fn of(command: &str) -> Self {
        match Command::parse(command.as_bytes()) {
            Command::Erase => Self::Erase,
            Command::Write(_) => Self::Write,
            Command::Read(_) => Self::Read,
            Command::Export => Self::Export,
            Command::Unknown => Self::Unknown,
            Command::Empty => Self::Empty,
        }
    }

    /// Whether `line` is the last response line for this command
    pub fn is_final(&self, line: &str) -> bool {
        if line.starts_with(ERROR_PREFIX) {
            return true;
        }
        match self {
            Self::Erase => line.starts_with("ERASED:"),
            Self::Write => line.starts_with("WRITTEN:"),
            Self::Read => line.starts_with("READ:"),
            Self::Export => line == END_EXPORT,
            Self::Unknown | Self::Empty => false,
        }
    }
}

/// Translate user input into a wire command
///
/// - `read 256` → `READ:256`
/// - `write hello world` → `WRITE:hello world`
/// - `erase` / `export` → `ERASE` / `EXPORT`
/// - `write:Hi` → `WRITE:Hi`
///
/// Keywords are case-insensitive, payloads are kept as typed. Anything
/// else is passed through trimmed.
pub fn normalize_command(input: &str) -> String {
    let input = input.trim();
    let (word, rest) = match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (input, ""),
    };

    match word.to_ascii_uppercase().as_str() {
        "READ" if !rest.is_empty() => {
            let count = rest.split_whitespace().next().unwrap_or_default();
            return format!("READ:{}", count);
        }
        "WRITE" if !rest.is_empty() => return format!("WRITE:{}", rest),
        "ERASE" | "EXPORT" if rest.is_empty() => return word.to_ascii_uppercase(),
        _ => {}
    }

    for prefix in ["WRITE:", "READ:"] {
        if input.len() >= prefix.len()
            && input.is_char_boundary(prefix.len())
            && input[..prefix.len()].eq_ignore_ascii_case(prefix)
        {
            return format!("{}{}", prefix, &input[prefix.len()..]);
        }
    }

    input.to_string()
}
