use embedded_io::Write;

use super::{Outcome, ERASE_PAUSE_MS, PROGRESS_INTERVAL};
use crate::device::FramDevice;
use crate::error::Result;
use crate::response::ResponseWriter;

/// Zero the whole address space
///
/// Prints `ERASING...`, one `.` per [`PROGRESS_INTERVAL`] addresses
/// (starting with address 0) and `DONE` on the same line, then the
/// completion status. Nothing is read back.
pub fn erase<D, W>(dev: &mut D, out: &mut ResponseWriter<W>) -> Result<Outcome>
where
    D: FramDevice + ?Sized,
    W: Write,
{
    let capacity = dev.capacity();
    out.text("ERASING...")?;
    out.flush()?;

    if let Err(e) = zero_fill(dev, out, capacity) {
        out.end_line()?;
        return Err(e);
    }

    out.line("DONE")?;
    out.line("ERASED: Full FRAM erased successfully")?;
    log::debug!("erased {} bytes", capacity);
    Ok(Outcome::Completed)
}

fn zero_fill<D, W>(dev: &mut D, out: &mut ResponseWriter<W>, capacity: u32) -> Result<()>
where
    D: FramDevice + ?Sized,
    W: Write,
{
    for addr in 0..capacity {
        dev.write_byte(addr, 0x00)?;

        if addr % PROGRESS_INTERVAL == 0 {
            out.text(".")?;
            out.flush()?;
            dev.delay_ms(ERASE_PAUSE_MS);
        }
    }
    Ok(())
}
