//! Command line parsing

/// Prefix of the write command
pub const WRITE_PREFIX: &[u8] = b"WRITE:";
/// Prefix of the read command
pub const READ_PREFIX: &[u8] = b"READ:";

/// A parsed command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `ERASE`
    Erase,
    /// `WRITE:<data>` - payload may be empty
    Write(&'a [u8]),
    /// `READ:<n>` - the count as parsed, not yet range checked
    Read(i64),
    /// `EXPORT`
    Export,
    /// Any other non-empty line
    Unknown,
    /// Blank line
    Empty,
}

impl<'a> Command<'a> {
    /// Parse one line
    ///
    /// Surrounding ASCII whitespace is ignored. Keywords are case-sensitive.
    pub fn parse(line: &'a [u8]) -> Self {
        let line = line.trim_ascii();

        if line.is_empty() {
            Command::Empty
        } else if line == b"ERASE" {
            Command::Erase
        } else if let Some(data) = line.strip_prefix(WRITE_PREFIX) {
            Command::Write(data)
        } else if let Some(count) = line.strip_prefix(READ_PREFIX) {
            Command::Read(parse_leading_int(count))
        } else if line == b"EXPORT" {
            Command::Export
        } else {
            Command::Unknown
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::Erase => "ERASE",
            Command::Write(_) => "WRITE",
            Command::Read(_) => "READ",
            Command::Export => "EXPORT",
            Command::Unknown => "unknown",
            Command::Empty => "empty",
        }
    }
}

/// Parse the leading decimal integer of `s`
///
/// Leading whitespace and one sign are accepted; parsing stops at the first
/// non-digit. Text without digits yields 0. Saturates instead of overflowing.
pub fn parse_leading_int(s: &[u8]) -> i64 {
    let s = s.trim_ascii_start();
    let (negative, digits) = match s.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for &c in digits.iter().take_while(|c| c.is_ascii_digit()) {
        let digit = i64::from(c - b'0');
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
    }
    value
}
