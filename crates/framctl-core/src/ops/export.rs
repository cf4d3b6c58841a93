use embedded_io::Write;

use super::{
    Outcome, EXPORT_BLOCK_LEN, EXPORT_PAUSE_INTERVAL, EXPORT_PAUSE_MS, EXPORT_ROW_LEN,
};
use crate::device::FramDevice;
use crate::error::Result;
use crate::response::ResponseWriter;

/// Dump the whole address space as a hex + ASCII listing
///
/// Raw bytes are dumped unconditionally; the record sentinel plays no role.
/// A row is only printed once all of its bytes were read, so a device fault
/// never leaves half a row on the wire.
pub fn export<D, W>(dev: &mut D, out: &mut ResponseWriter<W>) -> Result<Outcome>
where
    D: FramDevice + ?Sized,
    W: Write,
{
    let capacity = dev.capacity();
    let mut row = [0u8; EXPORT_ROW_LEN as usize];

    out.line("BEGIN_EXPORT")?;

    let mut base = 0u32;
    while base < capacity {
        if base % EXPORT_BLOCK_LEN == 0 && base > 0 {
            out.end_line()?;
        }

        let len = (capacity - base).min(EXPORT_ROW_LEN) as usize;
        for (addr, slot) in (base..).zip(row[..len].iter_mut()) {
            *slot = dev.read_byte(addr)?;
        }
        out.dump_row(base, &row[..len])?;

        if base % EXPORT_PAUSE_INTERVAL == 0 {
            out.flush()?;
            dev.delay_ms(EXPORT_PAUSE_MS);
        }
        base = base.saturating_add(EXPORT_ROW_LEN);
    }

    out.line("END_EXPORT")?;
    log::debug!("exported {} bytes", capacity);
    Ok(Outcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MemFram, Transcript};

    fn run(fram: &mut MemFram) -> Transcript {
        let mut out = ResponseWriter::new(Transcript::default());
        assert_eq!(export(fram, &mut out).unwrap(), Outcome::Completed);
        out.into_inner()
    }

    #[test]
    fn test_export_layout() {
        let mut fram = MemFram::with_data(32, b"Hi\0\x01there");
        let out = run(&mut fram);
        assert_eq!(
            out.lines(),
            [
                "BEGIN_EXPORT",
                "0000: 48 69 00 01 74 68 65 72 65 00 00 00 00 00 00 00  Hi..there.......",
                "0010: 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00  ................",
                "END_EXPORT",
            ]
        );
    }

    #[test]
    fn test_blank_line_every_256_bytes() {
        let mut fram = MemFram::new(1024);
        let out = run(&mut fram);
        let lines = out.lines();
        // header + 64 rows + 3 separators + footer
        assert_eq!(lines.len(), 1 + 64 + 3 + 1);
        assert_eq!(lines[16], "00F0: 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00  ................");
        assert_eq!(lines[17], "");
        assert!(lines[18].starts_with("0100: "));
        assert_eq!(lines[1 + 64 + 3], "END_EXPORT");
    }

    #[test]
    fn test_row_count_matches_capacity() {
        let mut fram = MemFram::new(32768);
        let out = run(&mut fram);
        let rows = out
            .lines()
            .into_iter()
            .filter(|l| l.len() > 4 && l.as_bytes()[4] == b':')
            .count();
        assert_eq!(rows, 32768 / 16);
        assert_eq!(fram.reads(), 32768);
    }

    #[test]
    fn test_truncated_final_row() {
        let mut fram = MemFram::with_data(20, b"0123456789ABCDEFWXYZ");
        let out = run(&mut fram);
        assert_eq!(out.lines()[2], "0010: 57 58 59 5A  WXYZ");
    }

    #[test]
    fn test_export_ignores_sentinel() {
        let mut fram = MemFram::with_data(16, b"\0\0secret");
        let out = run(&mut fram);
        assert!(out.lines()[1].ends_with("  ..secret........"));
    }
}
