use embedded_io::Write;

use super::Outcome;
use crate::device::FramDevice;
use crate::error::Result;
use crate::record::Record;
use crate::response::ResponseWriter;

/// Print up to `count` record bytes
///
/// Scanning stops early at the sentinel. The `DATA:` line is always
/// emitted, followed by a status line telling whether anything was found.
pub fn read<D, W>(dev: &mut D, out: &mut ResponseWriter<W>, count: i64) -> Result<Outcome>
where
    D: FramDevice + ?Sized,
    W: Write,
{
    let capacity = dev.capacity();
    if count <= 0 || count > i64::from(capacity) {
        out.fmt(format_args!(
            "ERROR: Invalid read length. Use 1-{}\n",
            capacity
        ))?;
        return Ok(Outcome::Rejected);
    }

    out.text("DATA: ")?;
    let found = Record::new(dev).scan(count as u32, |byte| out.record_byte(byte));
    out.end_line()?;
    let found = found?;

    if found == 0 {
        out.line("READ: Memory is empty.")?;
    } else {
        out.line("READ: Completed reading.")?;
    }
    log::debug!("read {} of {} requested bytes", found, count);
    Ok(Outcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MemFram, Transcript};

    fn run(fram: &mut MemFram, count: i64) -> (Outcome, Transcript) {
        let mut out = ResponseWriter::new(Transcript::default());
        let outcome = read(fram, &mut out, count).unwrap();
        (outcome, out.into_inner())
    }

    #[test]
    fn test_read_until_sentinel() {
        let mut fram = MemFram::with_data(64, b"hello\0world");
        let (outcome, out) = run(&mut fram, 20);
        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(out.lines(), ["DATA: hello", "READ: Completed reading."]);
    }

    #[test]
    fn test_read_stops_at_count() {
        let mut fram = MemFram::with_data(64, b"hello");
        let (_, out) = run(&mut fram, 2);
        assert_eq!(out.lines()[0], "DATA: he");
    }

    #[test]
    fn test_non_printable_bytes_in_brackets() {
        let mut fram = MemFram::with_data(64, &[b'a', 0x0A, 0xFF, b'~', 0x7F]);
        let (_, out) = run(&mut fram, 64);
        assert_eq!(out.lines()[0], "DATA: a[0A][FF]~[7F]");
    }

    #[test]
    fn test_empty_memory() {
        let mut fram = MemFram::new(64);
        let (_, out) = run(&mut fram, 10);
        assert_eq!(out.text(), "DATA: \nREAD: Memory is empty.\n");
        assert_eq!(fram.reads(), 1);
    }

    #[test]
    fn test_invalid_lengths_do_not_touch_device() {
        for count in [0, -1, 65, i64::MAX, i64::MIN] {
            let mut fram = MemFram::with_data(64, b"data");
            let (outcome, out) = run(&mut fram, count);
            assert_eq!(outcome, Outcome::Rejected);
            assert_eq!(out.text(), "ERROR: Invalid read length. Use 1-64\n");
            assert_eq!(fram.reads(), 0);
        }
    }

    #[test]
    fn test_full_capacity_read_is_valid() {
        let mut fram = MemFram::with_data(4, b"abcd");
        let (outcome, out) = run(&mut fram, 4);
        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(out.lines()[0], "DATA: abcd");
    }
}
