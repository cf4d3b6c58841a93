//! Export capture
//!
//! Turns the `BEGIN_EXPORT` … `END_EXPORT` listing back into a byte image
//! so it can be saved as a binary file or compared against a reference.

use crate::error::{ClientError, Result};
use crate::protocol::{BEGIN_EXPORT, END_EXPORT};

/// Bytes per listing row
const ROW_LEN: usize = 16;

/// Decoded export listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDump {
    /// Memory contents from address 0
    pub bytes: Vec<u8>,
    /// Listing lines from `BEGIN_EXPORT` to `END_EXPORT` inclusive
    pub listing: Vec<String>,
}

impl ExportDump {
    /// Parse an export transcript
    ///
    /// Lines before `BEGIN_EXPORT` are ignored. Rows must be contiguous,
    /// start at address 0, and their ASCII column must agree in width
    /// with the hex fields.
    pub fn parse<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut bytes = Vec::new();
        let mut listing = Vec::new();
        let mut started = false;
        let mut short_row_seen = false;

        for (idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            let lineno = idx + 1;

            if !started {
                if line == BEGIN_EXPORT {
                    started = true;
                    listing.push(line.to_string());
                }
                continue;
            }

            listing.push(line.to_string());
            if line == END_EXPORT {
                return Ok(Self { bytes, listing });
            }
            if line.is_empty() {
                continue;
            }

            let malformed = |reason: String| ClientError::MalformedExport {
                line: lineno,
                reason,
            };

            if short_row_seen {
                return Err(malformed("row after a short final row".into()));
            }

            let (addr, rest) = line
                .split_once(": ")
                .ok_or_else(|| malformed("missing address".into()))?;
            let addr = usize::from_str_radix(addr, 16)
                .map_err(|_| malformed(format!("bad address {:?}", addr)))?;
            if addr != bytes.len() {
                return Err(malformed(format!(
                    "address {:04X}, expected {:04X}",
                    addr,
                    bytes.len()
                )));
            }

            let (hex, ascii) = rest
                .split_once("  ")
                .ok_or_else(|| malformed("missing ASCII column".into()))?;
            let row: Vec<u8> = hex
                .split(' ')
                .map(|field| {
                    if field.len() != 2 {
                        return Err(malformed(format!("bad byte field {:?}", field)));
                    }
                    u8::from_str_radix(field, 16)
                        .map_err(|_| malformed(format!("bad byte field {:?}", field)))
                })
                .collect::<Result<_>>()?;

            if row.is_empty() || row.len() > ROW_LEN {
                return Err(malformed(format!("{} byte fields", row.len())));
            }
            if ascii.len() != row.len() {
                return Err(malformed(format!(
                    "ASCII column has {} chars for {} bytes",
                    ascii.len(),
                    row.len()
                )));
            }

            short_row_seen = row.len() < ROW_LEN;
            bytes.extend_from_slice(&row);
        }

        let reason = if started {
            "missing END_EXPORT"
        } else {
            "missing BEGIN_EXPORT"
        };
        Err(ClientError::MalformedExport {
            line: 0,
            reason: reason.into(),
        })
    }

    /// Listing text as sent by the device, newline-terminated
    pub fn listing_text(&self) -> String {
        let mut text = self.listing.join("\n");
        text.push('\n');
        text
    }
}
